//! Layout parsing and export tests on a complete ISO layout.

use kalamine::export::driver::{Driver, RenderOptions};
use kalamine::models::{KeyId, LayerPair, Level};
use kalamine::parser::{lines_to_text, merge_combining};
use kalamine::{parse_layout_str, Registry};

mod fixtures;
use fixtures::*;

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_all_levels_of_a_key() {
    let layout = lafayette();
    let expected = [
        (Level::Base, 'q'),
        (Level::Shift, 'Q'),
        (Level::DeadKey, 'â'),
        (Level::DeadKeyShift, 'Â'),
        (Level::AltGr, 'æ'),
        (Level::AltGrShift, 'Æ'),
    ];
    for (level, symbol) in expected {
        assert_eq!(layout.symbol(KeyId::Ad01, level), Some(symbol), "{level}");
    }
}

#[test]
fn test_derived_and_missing_shift_symbols() {
    let layout = lafayette();
    assert_eq!(layout.symbol(KeyId::Ac02, Level::AltGrShift), Some('ẞ'));
    assert_eq!(layout.symbol(KeyId::Ac06, Level::AltGr), Some('\u{0300}'));
    assert_eq!(layout.symbol(KeyId::Ac06, Level::AltGrShift), None);
    assert_eq!(layout.symbol(KeyId::Ae04, Level::DeadKeyShift), None);
    assert_eq!(layout.symbol(KeyId::Lsgt, Level::Base), Some('<'));
    assert_eq!(layout.symbol(KeyId::Lsgt, Level::Shift), Some('>'));
}

#[test]
fn test_metadata() {
    let layout = lafayette();
    assert_eq!(layout.metadata.name, "lafayette");
    assert_eq!(layout.metadata.locale, "fr");
    assert_eq!(layout.metadata.version, "1.0.0");
    assert_eq!(layout.geometry().name, "ISO");
}

#[test]
fn test_dead_keys_in_first_seen_order() {
    let layout = lafayette();
    let names: Vec<&str> = layout.dead_keys().map(|dk| dk.name.as_str()).collect();
    assert_eq!(names, vec!["lafayette", "diaeresis", "acute", "grave"]);
}

#[test]
fn test_dead_key_tables_only_use_producible_bases() {
    let layout = lafayette();
    for dk in layout.dead_keys() {
        for (base, alt) in dk.pairs() {
            assert!(layout.produces(base), "{}: {base} -> {alt}", dk.name);
        }
    }
    let acute = layout.dead_key('\u{0301}').unwrap();
    assert_eq!(acute.compose('e'), Some('é'));
    assert_eq!(acute.compose('ç'), None);
}

#[test]
fn test_layout_defined_dead_key_table() {
    let layout = lafayette();
    let dk = layout.dead_key('\u{20e1}').unwrap();
    assert!(dk.is_layout_defined());
    assert_eq!(dk.compose('q'), Some('â'));
    assert_eq!(dk.compose('Q'), Some('Â'));
    assert_eq!(dk.compose(','), Some('\u{0308}'));
    assert_eq!(dk.compose('4'), Some('€'));
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_geometry_view_reproduces_source() {
    let layout = lafayette();
    let source: serde_yaml::Value = serde_yaml::from_str(LAFAYETTE_SOURCE).unwrap();

    for (block, pairs) in [
        ("base", vec![LayerPair::Base, LayerPair::DeadKey]),
        ("altgr", vec![LayerPair::AltGr]),
    ] {
        let text = merge_combining(source[block].as_str().unwrap());
        let expected: Vec<&str> = text.lines().collect();
        let drawn = layout.get_geometry(&pairs, "ISO").unwrap();
        assert_eq!(drawn, expected, "{block} block");
    }
}

#[test]
fn test_fill_then_parse_keeps_every_symbol() {
    let layout = lafayette();
    let base = layout
        .get_geometry(&[LayerPair::Base, LayerPair::DeadKey], "ISO")
        .unwrap();
    let altgr = layout.get_geometry(&[LayerPair::AltGr], "ISO").unwrap();
    let source = format!(
        "name: again\ngeometry: ISO\nbase: |\n{}\naltgr: |\n{}\n",
        lines_to_text(&base, "  "),
        lines_to_text(&altgr, "  ")
    );

    let again = parse_layout_str(&source, Registry::builtin().unwrap()).unwrap();
    for key in KeyId::all() {
        for level in Level::ALL {
            assert_eq!(
                again.symbol(key, level),
                layout.symbol(key, level),
                "{key} at {level}"
            );
        }
    }
    let names = |l: &kalamine::Layout| -> Vec<String> { l.dead_keys().map(|dk| dk.name.clone()).collect() };
    assert_eq!(names(&again), names(&layout));
}

#[test]
fn test_base_symbol_without_shift_survives_preview() {
    let source = LAFAYETTE_SOURCE.replacen("│ ~   │ !   │", "│ ~   │     │", 1);
    let layout = parse_layout_str(&source, Registry::builtin().unwrap()).unwrap();
    assert_eq!(layout.symbol(KeyId::Ae01, Level::Base), Some('1'));
    assert_eq!(layout.symbol(KeyId::Ae01, Level::Shift), None);

    let preview = layout
        .get_geometry(&[LayerPair::Base, LayerPair::DeadKey], "ISO")
        .unwrap();
    assert!(preview[2].starts_with("│ `   │ 1   │ 2   │"));

    let again = format!("geometry: ISO\nbase: |\n{}\n", lines_to_text(&preview, "  "));
    let again = parse_layout_str(&again, Registry::builtin().unwrap()).unwrap();
    assert_eq!(again.symbol(KeyId::Ae01, Level::Base), Some('1'));
    assert_eq!(again.symbol(KeyId::Ae01, Level::Shift), None);
}

// ============================================================================
// XKB
// ============================================================================

#[test]
fn test_xkb_key_lines() {
    let lines = lafayette().xkb();
    assert_eq!(
        line_starting_with(&lines, "key <AD01>"),
        "key <AD01> {[ q               , Q               , acircumflex     , Acircumflex     ],\
         [ ae              , AE              ]}; // q Q â Â æ Æ"
    );
    assert_eq!(
        line_starting_with(&lines, "key <AC10>"),
        "key <AC10> {[ ISO_Level3_Latch, colon           , VoidSymbol      , VoidSymbol      ],\
         [ VoidSymbol      , VoidSymbol      ]}; // ¤ :"
    );
    assert_eq!(
        line_starting_with(&lines, "key <AE04>"),
        "key <AE04> {[ 4               , dollar          , EuroSign        , VoidSymbol      ],\
         [ EuroSign        , dead_acute      ]}; // 4 $ €   € ´"
    );
}

#[test]
fn test_xkb_covers_every_key_once() {
    let lines = lafayette().xkb();
    let keys: Vec<&String> = lines.iter().filter(|l| l.starts_with("key <")).collect();
    assert_eq!(keys.len(), KeyId::all().count());
    for key in KeyId::all() {
        let prefix = format!("key <{}>", key.as_str().to_uppercase());
        assert_eq!(keys.iter().filter(|l| l.starts_with(&prefix)).count(), 1);
    }
}

#[test]
fn test_xkb_symbols_fit_sixteen_columns() {
    let lines = lafayette().xkb_lines(false);
    for line in lines.iter().filter(|l| l.starts_with("key <")) {
        let body = &line[line.find("{[").unwrap() + 2..line.rfind("]}").unwrap()];
        for symbol in body.split(|c| c == ',' || c == '[' || c == ']') {
            let symbol = symbol.trim();
            assert!(symbol.len() <= 16, "{symbol} in {line}");
        }
    }
}

#[test]
fn test_xkb_is_pure() {
    let layout = lafayette();
    assert_eq!(layout.xkb(), layout.xkb());
    let options = RenderOptions::default();
    assert_eq!(
        Driver::Xkb.render(&layout, &options).unwrap(),
        Driver::Xkb.render(&layout, &options).unwrap()
    );
}

// ============================================================================
// KLC
// ============================================================================

#[test]
fn test_klc_altgr_shift_dead_key() {
    let layout = lafayette();
    let lines = layout.klc();
    assert_eq!(
        line_starting_with(&lines, "05\t"),
        "05\t4\t0\t4\t0024\t-1\t20ac\t00b4@\t// 4 $ € ´"
    );

    let index = layout.klc_dk_index();
    assert_eq!(index.iter().filter(|l| *l == "00b4\t\"ACUTE\"").count(), 1);
    assert_eq!(
        index,
        vec![
            "00a4\t\"LAFAYETTE\"",
            "00a8\t\"DIAERESIS\"",
            "00b4\t\"ACUTE\"",
            "0060\t\"GRAVE\"",
        ]
    );
}

#[test]
fn test_klc_rows_and_caps_flag() {
    let lines = lafayette().klc();
    assert_eq!(
        line_starting_with(&lines, "10\t"),
        "10\tQ\t1\tq\tQ\t-1\t00e6\t00c6\t// q Q æ Æ"
    );
    assert_eq!(
        line_starting_with(&lines, "27\t"),
        "27\tOEM_1\t0\t00a4@\t003a\t-1\t-1\t-1\t// ¤ :"
    );
    assert!(line_starting_with(&lines, "02\t").starts_with("02\t1\t0\t"));
    assert!(line_starting_with(&lines, "2e\t").starts_with("2e\tC\t1\tc\tC\t"));
}

#[test]
fn test_klc_layout_defined_dead_key_block() {
    let lines = lafayette().klc_deadkeys();
    assert_eq!(lines[0], "// DEADKEY: LAFAYETTE //{{{");
    assert_eq!(lines[1], "DEADKEY\t00a4");

    let end = lines.iter().position(|l| l == "//}}}").unwrap();
    let block = &lines[..end];
    for pair in [
        "0071\t00e2\t// q -> â",
        "0051\t00c2\t// Q -> Â",
        "002c\t00a8@\t// , -> ¨",
        "0034\t20ac\t// 4 -> €",
        "0020\t00a4\t//   -> ¤",
    ] {
        assert!(block.contains(&pair.to_string()), "missing {pair:?}");
    }
}

#[test]
fn test_klc_table_dead_key_block() {
    let lines = lafayette().klc_deadkeys();
    let start = lines
        .iter()
        .position(|l| l == "// DEADKEY: ACUTE //{{{")
        .unwrap();
    assert_eq!(lines[start + 1], "DEADKEY\t00b4");
    let block: Vec<&String> = lines[start..]
        .iter()
        .take_while(|l| *l != "//}}}")
        .collect();
    assert!(block.iter().any(|l| *l == "0065\t00e9\t// e -> é"));
    assert!(block.iter().any(|l| *l == "0045\t00c9\t// E -> É"));
}

// ============================================================================
// macOS and JSON
// ============================================================================

#[test]
fn test_osx_views() {
    let layout = lafayette();
    let base = layout.osx_keymap(0).unwrap();
    assert!(base.contains(&"<key code=\"41\"  action=\"dead_lafayette\" />".to_string()));

    let altgr_shift = layout.osx_keymap(5).unwrap();
    assert!(altgr_shift.contains(&"<key code=\"21\"  action=\"dead_acute\" />".to_string()));

    let actions = layout.osx_actions();
    for id in ["dead_lafayette", "dead_diaeresis", "dead_acute", "dead_grave"] {
        let line = format!("<action id=\"{id}\">");
        assert_eq!(actions.iter().filter(|l| **l == line).count(), 1, "{id}");
    }

    let terminators = layout.osx_terminators();
    assert_eq!(terminators.len(), 4);
    assert_eq!(terminators[0], " <when state=\"lafayette\"  output=\"¤\" />");
}

#[test]
fn test_json_view() {
    let json = lafayette().json();
    assert_eq!(json.name, "lafayette");
    assert_eq!(json.geometry, "iso");
    assert_eq!(json.keymap["Semicolon"], vec!["*¤", ":"]);
    assert_eq!(json.keymap["KeyQ"], vec!["q", "Q", "æ", "Æ"]);
    assert_eq!(json.deadkeys["*¤"]["q"], "â");
    assert_eq!(json.deadkeys["*´"]["e"], "é");
}

// ============================================================================
// Drivers
// ============================================================================

#[test]
fn test_drivers_substitute_every_marker() {
    let layout = lafayette();
    let options = RenderOptions::default();
    for driver in Driver::ALL {
        let out = driver.render(&layout, &options).unwrap();
        assert!(!out.contains("KALAMINE::"), "{driver}");
        assert!(!out.contains("${"), "{driver}");
        assert!(out.contains("Test Lafayette"), "{driver}");
    }
}

#[test]
fn test_xkb_driver_header() {
    let out = Driver::Xkb
        .render(&lafayette(), &RenderOptions::default())
        .unwrap();
    assert!(out.contains("xkb_symbols \"lafayette\" {"));
    assert!(out.contains("name[group1]= \"Test Lafayette\";"));
    assert!(out.contains("// Locale: fr, version 1.0.0, by Test Suite"));
}

#[test]
fn test_empty_layout_exports() {
    let layout = parse_layout_str(EMPTY_SOURCE, Registry::builtin().unwrap()).unwrap();
    assert_eq!(layout.dead_keys().count(), 0);
    assert!(layout.klc_dk_index().is_empty());
    assert!(layout.klc_deadkeys().is_empty());
    assert!(layout.osx_terminators().is_empty());
    let lines = layout.klc();
    assert_eq!(
        line_starting_with(&lines, "10\t"),
        "10\tQ\t0\t-1\t-1\t-1\t-1\t-1\t//"
    );
    for driver in Driver::ALL {
        assert!(driver.render(&layout, &RenderOptions::default()).is_ok());
    }
}
