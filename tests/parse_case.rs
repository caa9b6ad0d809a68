mod common;

use common::{BUS, TWO_AREA, build};
use rawcase::{Error, Section, Transformer, Warning, parse_raw_str};

#[test]
fn two_area_case_reads_every_section() {
    let parsed = parse_raw_str(TWO_AREA).unwrap();
    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);

    let case = &parsed.case;
    assert_eq!(case.sbase, 100.0);
    assert_eq!(case.rev, 33);
    assert_eq!(case.nxfrat, 1.0);
    assert_eq!(case.basfrq, 60.0);
    assert_eq!(case.record1, "TWO AREA TEST SYSTEM");
    assert_eq!(case.record2, "NUCLEAR NORTH, HYDRO SOUTH");

    let counts: Vec<usize> = case.section_counts().into_iter().map(|(_, n)| n).collect();
    assert_eq!(
        counts,
        vec![4, 2, 1, 1, 2, 2, 2, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 0, 1]
    );

    assert_eq!(case.buses[0].name, "NUC-A       ");
    assert_eq!(case.buses[3].va, -12.25);
    assert_eq!(case.generators[0].zx, 0.25);
    assert!(case.branches[1].is_breaker());
    assert_eq!(case.areas[1].arnam, "SOUTH       ");
    assert_eq!(case.two_terminal_dc_lines[0].parameters.meter, "I");
    assert_eq!(case.two_terminal_dc_lines[0].inverter.ip, 202);
    assert_eq!(case.impedance_corrections[0].points.len(), 3);
    assert_eq!(case.line_groupings[0].dummies, vec![102]);
    assert_eq!(case.facts_devices[0].mname, "");
    assert_eq!(case.switched_shunts[0].blocks.len(), 2);
    assert_eq!(case.switched_shunts[0].b_max(), 50.0);
    assert_eq!(case.switched_shunts[0].b_min(), -50.0);
    assert_eq!(case.induction_machines[0].e2, 1.2);
}

#[test]
fn transformer_line_count_follows_tertiary_bus() {
    let case = parse_raw_str(TWO_AREA).unwrap().case;

    let two = &case.transformers[0];
    assert!(!two.is_three_winding());
    assert_eq!(two.line_count(), 4);
    assert_eq!(two.parameters().name, "NUC XFMR    ");

    match &case.transformers[1] {
        Transformer::ThreeWinding(t) => {
            assert_eq!(t.p1.k, 102);
            assert_eq!(t.p2.x31, 0.05);
            assert_eq!(t.w1.cont, 202);
            assert_eq!(t.w3.rata, 100.0);
        }
        other => panic!("expected a three-winding transformer, got {:?}", other),
    }

    // the area section starts right after the fifth line
    assert_eq!(case.areas[0].i, 1);
}

#[test]
fn multi_terminal_dc_reads_counted_lines() {
    let case = parse_raw_str(TWO_AREA).unwrap().case;
    let mtdc = &case.multi_terminal_dc_lines[0];
    assert_eq!(mtdc.converters.len(), 2);
    assert_eq!(mtdc.dc_buses.len(), 1);
    assert_eq!(mtdc.dc_links.len(), 1);
    assert_eq!(mtdc.line_count(), 5);
    assert_eq!(mtdc.converters[1].setvl, -100.0);
    assert_eq!(mtdc.dc_buses[0].dcname, "DCBUS1      ");
    assert_eq!(mtdc.dc_links[0].rdc, 5.0);
    assert_eq!(case.line_groupings.len(), 1);
}

#[test]
fn vsc_defaults_fill_absent_tail() {
    let case = parse_raw_str(TWO_AREA).unwrap().case;
    let vsc = &case.vsc_dc_lines[0];
    assert_eq!(vsc.parameters.owners.o1, 1);
    assert_eq!(vsc.parameters.owners.f4, 1.0);
    assert_eq!(vsc.converter2.remot, 0);
    assert_eq!(vsc.converter2.rmpct, 100.0);
    assert_eq!(case.loads[1].intrpt, 0);
}

#[test]
fn blank_fields_take_defaults() {
    let text = build(&[(Section::Bus, "7,,,,,,,,,,,,")]);
    let bus = &parse_raw_str(&text).unwrap().case.buses[0];
    assert_eq!(bus.i, 7);
    assert_eq!(bus.name, "            ");
    assert_eq!(bus.basekv, 0.0);
    assert_eq!(bus.ide, 1);
    assert_eq!(bus.area, 1);
    assert_eq!(bus.vm, 1.0);
    assert_eq!(bus.nvhi, 1.1);
    assert_eq!(bus.evlo, 0.9);
}

#[test]
fn short_line_is_an_error() {
    let text = build(&[(Section::Bus, "1,'ONE', 138.0,1,1,1,1,1.0,0.0,1.1,0.9,1.1")]);
    match parse_raw_str(&text) {
        Err(Error::TooFewFields {
            section,
            line,
            min,
            found,
            ..
        }) => {
            assert_eq!(section, "bus");
            assert_eq!(line, 3);
            assert_eq!(min, 13);
            assert_eq!(found, 12);
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn unparseable_number_is_an_error() {
    let text = build(&[(
        Section::Load,
        "1,'1 ',1,1,1,abc,0.0,0.0,0.0,0.0,0.0,1,1,0",
    )]);
    assert!(matches!(
        parse_raw_str(&text),
        Err(Error::MalformedValue { field: "pl", .. })
    ));
}

#[test]
fn blank_required_field_is_an_error() {
    let text = build(&[(
        Section::Branch,
        "1,2,'1 ',0.0,,0.0,0,0,0,0,0,0,0,1,1,0,1,1.0,0,1.0,0,1.0,0,1.0",
    )]);
    assert!(matches!(
        parse_raw_str(&text),
        Err(Error::MalformedValue { field: "x", section: "branch", .. })
    ));
}

#[test]
fn extra_fields_are_dropped_with_a_warning() {
    let text = build(&[(Section::FixedShunt, "1,'1 ',1,0.0,10.0,99")]);
    let parsed = parse_raw_str(&text).unwrap();
    assert_eq!(parsed.case.fixed_shunts[0].bl, 10.0);
    assert_eq!(
        parsed.warnings,
        vec![Warning::TooManyFields {
            section: "fixed shunt",
            line: 5,
            max: 5,
            found: 6,
        }]
    );
}

#[test]
fn change_case_is_rejected() {
    let text = TWO_AREA.replacen("0,   100.00", "1,   100.00", 1);
    match parse_raw_str(&text) {
        Err(Error::UnsupportedCaseType { value }) => assert_eq!(value, "1"),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn other_revision_warns_and_continues() {
    let text = TWO_AREA.replacen("100.00, 33,", "100.00, 32,", 1);
    let parsed = parse_raw_str(&text).unwrap();
    assert_eq!(parsed.case.rev, 32);
    assert_eq!(parsed.case.buses.len(), 4);
    assert_eq!(
        parsed.warnings,
        vec![Warning::UnsupportedRevision {
            given: "32".to_string(),
            supported: 33,
        }]
    );
}

#[test]
fn header_defaults_when_blank() {
    let text = "0,,,,,\nA\nB\n0\n0\n0\n0\n0\n0\n0\n0\n0\n0\n0\n0\n0\n0\n0\n0\n0\n0\n0\nQ\n";
    let parsed = parse_raw_str(text).unwrap();
    assert!(parsed.warnings.is_empty());
    assert_eq!(parsed.case.sbase, 100.0);
    assert_eq!(parsed.case.rev, 33);
    assert_eq!(parsed.case.basfrq, 60.0);
}

#[test]
fn short_header_is_an_error() {
    let text = "0\nA\nB\n0\n0\n0\n0\n0\n0\n0\n0\n0\n0\n0\n0\n0\n0\n0\n0\n0\n0\n0\nQ\n";
    match parse_raw_str(text) {
        Err(Error::TooFewFields {
            section,
            line,
            min,
            found,
            ..
        }) => {
            assert_eq!(section, "case identification");
            assert_eq!(line, 0);
            assert_eq!(min, 6);
            assert_eq!(found, 1);
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn long_header_warns_and_keeps_six_values() {
    let text = TWO_AREA.replacen("60.00     /", "60.00, 99, 98 /", 1);
    let parsed = parse_raw_str(&text).unwrap();
    assert_eq!(parsed.case.basfrq, 60.0);
    assert_eq!(
        parsed.warnings,
        vec![Warning::TooManyFields {
            section: "case identification",
            line: 0,
            max: 6,
            found: 8,
        }]
    );
}

#[test]
fn comment_after_terminator_is_ignored() {
    let parsed = parse_raw_str(TWO_AREA).unwrap();
    assert_eq!(parsed.case.loads.len(), 2);
}

#[test]
fn quoted_comma_and_slash_stay_in_names() {
    let text = build(&[(
        Section::Bus,
        "1,'A,B/C     ', 138.0,1,1,1,1,1.0,0.0,1.1,0.9,1.1,0.9 / comment, with, commas",
    )]);
    let bus = &parse_raw_str(&text).unwrap().case.buses[0];
    assert_eq!(bus.name, "A,B/C     ");
    assert_eq!(bus.evlo, 0.9);
}

#[test]
fn second_comment_delimiter_is_an_error() {
    let text = build(&[(Section::Bus, "1,'A', 138.0,1,1,1,1,1.0,0.0,1.1,0.9,1.1,0.9 / a / b")]);
    assert!(matches!(
        parse_raw_str(&text),
        Err(Error::MalformedLine {
            section: "bus",
            line: 3
        })
    ));
}

#[test]
fn gne_lines_are_counted_and_skipped() {
    let text = build(&[
        (Section::Gne, "'GNE1', 'MODEL', 2, 1, 0, 0, 0, 0"),
        (Section::Gne, "101, 102"),
    ]);
    let parsed = parse_raw_str(&text).unwrap();
    assert_eq!(
        parsed.warnings,
        vec![Warning::SkippedSection {
            section: "gne device",
            lines: 2,
        }]
    );
}

#[test]
fn early_q_ends_the_case() {
    let text = format!(
        "0, 100.0, 33, 0.0, 0.0, 60.0\nA\nB\n{}\n0 / END OF BUS DATA\nQ\n",
        BUS
    );
    let parsed = parse_raw_str(&text).unwrap();
    assert!(parsed.warnings.is_empty());
    assert_eq!(parsed.case.buses.len(), 1);
    assert!(parsed.case.loads.is_empty());
    assert!(parsed.case.induction_machines.is_empty());
}

#[test]
fn content_after_q_is_reported() {
    let text = format!("{}\n{}\n\n", build(&[(Section::Bus, BUS)]), "NOT PART OF THE CASE");
    let parsed = parse_raw_str(&text).unwrap();
    assert_eq!(parsed.warnings, vec![Warning::TrailingContent { lines: 1 }]);
    assert_eq!(parsed.case.buses.len(), 1);
}

#[test]
fn missing_final_q_is_tolerated() {
    let text = build(&[(Section::Bus, BUS)]);
    let text = text.strip_suffix("\nQ").unwrap();
    let parsed = parse_raw_str(text).unwrap();
    assert!(parsed.warnings.is_empty());
    assert_eq!(parsed.case.buses.len(), 1);
}

#[test]
fn input_ending_inside_a_section() {
    let text = format!("0, 100.0, 33, 0.0, 0.0, 60.0\nA\nB\n{}\n", BUS);
    assert!(matches!(
        parse_raw_str(&text),
        Err(Error::UnexpectedEnd {
            section: "bus",
            line: 4
        })
    ));
}

#[test]
fn input_ending_inside_a_transformer() {
    let cut = TWO_AREA.find(" 0.00000E+0, 1.00000E-2").unwrap();
    assert!(matches!(
        parse_raw_str(&TWO_AREA[..cut]),
        Err(Error::UnexpectedEnd {
            section: "transformer",
            ..
        })
    ));
}

#[test]
fn negative_converter_count_is_malformed() {
    let text = build(&[(Section::MultiTerminalDc, "'MTDC1', -1, 0, 0, 1, 500, 0.0, 0")]);
    assert!(matches!(
        parse_raw_str(&text),
        Err(Error::MalformedValue {
            field: "nconv",
            section: "multi-terminal dc line",
            ..
        })
    ));
}

#[test]
fn converter_count_beyond_the_input_runs_out() {
    let text = build(&[(
        Section::MultiTerminalDc,
        "'MTDC1', 2000000000, 0, 0, 1, 500, 0.0, 0",
    )]);
    assert!(matches!(
        parse_raw_str(&text),
        Err(Error::UnexpectedEnd {
            section: "multi-terminal dc line",
            ..
        })
    ));
}

#[test]
fn too_short_input() {
    assert!(matches!(
        parse_raw_str("0, 100.0, 33\nONLY ONE\n"),
        Err(Error::TooFewLines { found: 2 })
    ));
}

#[test]
fn windows_line_endings() {
    let text = TWO_AREA.replace('\n', "\r\n");
    let parsed = parse_raw_str(&text).unwrap();
    assert_eq!(parsed.case, parse_raw_str(TWO_AREA).unwrap().case);
}
