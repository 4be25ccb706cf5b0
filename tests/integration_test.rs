//! Integration Tests for progsheet
//!
//! 実際のワークブックを生成し、読み込みからJSON出力までを検証します。

use progsheet::{
    ConverterBuilder, Dialect, LinkType, OutputFormat, ProgSheetError, SheetSelector,
};
use rust_xlsxwriter::*;
use std::io::Cursor;

// Helper module for generating test fixtures
mod fixtures {
    use super::*;

    /// 1列目にトークンを上から順に書き込む
    pub fn write_column(worksheet: &mut Worksheet, tokens: &[&str]) -> Result<(), XlsxError> {
        for (row, token) in tokens.iter().enumerate() {
            worksheet.write_string(row as u32, 0, *token)?;
        }
        Ok(())
    }

    /// `NAME:`接頭辞方言のプログラミングシート
    ///
    /// 表紙シートの後に"Programming Details"シートを置き、複数行セル・全角記号・
    /// 数値セルを含めます。
    pub fn generate_prefixed_workbook() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();

        let cover = workbook.add_worksheet();
        cover.set_name("Cover")?;
        cover.write_string(0, 0, "KASTA DEVICE")?;
        cover.write_string(1, 0, "KBSKTDIM")?;
        cover.write_string(2, 0, "Should Not Appear")?;

        let sheet = workbook.add_worksheet();
        sheet.set_name("Programming Details")?;
        sheet.write_string(0, 0, "KASTA DEVICE")?;
        sheet.write_string(1, 0, "KBSKTDIM")?;
        sheet.write_string(1, 1, "（2-gang）")?;
        sheet.write_string(2, 0, "QTY：2")?;
        sheet.write_string(2, 1, "NAME：\nKitchen Light\nBedroom Light")?;
        sheet.write_string(3, 0, "H2RSMB")?;
        sheet.write_string(4, 0, "Hall Remote")?;
        sheet.write_string(5, 0, "KASTA GROUP")?;
        sheet.write_string(6, 0, "TOTAL 2 GROUP")?;
        sheet.write_string(7, 0, "Kitchen")?;
        sheet.write_string(7, 1, "Bedroom")?;
        sheet.write_number(7, 2, 42.0)?;
        sheet.write_string(8, 0, "KASTA SCENE")?;
        sheet.write_string(9, 0, "NAME: Dinner")?;
        sheet.write_string(10, 0, "CONTROL CONTENT:\nKitchen ON\nBedroom DIM + 45%")?;
        sheet.write_string(11, 0, "NAME: Movie")?;
        sheet.write_string(12, 0, "Kitchen OFF")?;
        sheet.write_string(13, 0, "REMOTE CONTROL LINK")?;
        sheet.write_string(14, 0, "TOTAL 1 REMOTE")?;
        sheet.write_string(15, 0, "NAME: Hall Remote")?;
        sheet.write_string(16, 0, "BUTTON 1: SCENE BRIGHT")?;
        sheet.write_string(17, 0, "BUTTON 2: GROUP Kitchen")?;
        sheet.write_string(18, 0, "BUTTON 3: DND")?;
        sheet.write_string(19, 0, "BUTTON 4: DEVICE Porch")?;
        sheet.write_string(20, 0, "BUTTON X: DEVICE Porch")?;

        Ok(workbook.save_to_buffer()?)
    }

    /// 既知の語彙でシーン名・リモコン名を区切る方言のプログラミングシート
    pub fn generate_keyword_workbook() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Programming Details - Site B")?;
        write_column(
            sheet,
            &[
                "KASTA DEVICE",
                "KBSKTREL",
                "Porch",
                "KASTA GROUP",
                "Hall",
                "Lamp1 ON",
                "KASTA SCENE",
                "BRIGHT",
                "Lamp1 ON",
                "Lamp2 DIM + 30%",
                "ALL OFF",
                "Lamp1 OFF",
                "REMOTE CONTROL LINK",
                "H2RSMB",
                "BUTTON 1: SCENE BRIGHT",
                "BUTTON 2: GROUP Hall",
            ],
        )?;
        Ok(workbook.save_to_buffer()?)
    }

    /// 指定した名前のシートに1列のトークンを書いたワークブック
    pub fn generate_single_sheet(name: &str, tokens: &[&str]) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(name)?;
        write_column(sheet, tokens)?;
        Ok(workbook.save_to_buffer()?)
    }
}

// TC-I-001: Prefixed Dialect Workbook
#[test]
fn test_prefixed_workbook_document() {
    let converter = ConverterBuilder::new().build().unwrap();
    let excel_data = fixtures::generate_prefixed_workbook().unwrap();

    let document = converter.parse_document(Cursor::new(excel_data)).unwrap();

    let devices: Vec<(&str, &str)> = document
        .devices
        .iter()
        .map(|d| (d.appearance_shortname.as_str(), d.device_name.as_str()))
        .collect();
    assert_eq!(
        devices,
        vec![
            ("KBSKTDIM", "Kitchen Light"),
            ("KBSKTDIM", "Bedroom Light"),
            ("H2RSMB", "Hall Remote"),
        ]
    );

    let groups: Vec<&str> = document.groups.iter().map(|g| g.group_name.as_str()).collect();
    assert_eq!(groups, vec!["Kitchen", "Bedroom"]);

    assert_eq!(document.scenes.len(), 2);
    let dinner = &document.scenes[0];
    assert_eq!(dinner.scene_name, "Dinner");
    assert_eq!(dinner.contents.len(), 2);
    assert_eq!(dinner.contents[0].name, "Kitchen");
    assert_eq!(dinner.contents[0].level(), 100);
    assert_eq!(dinner.contents[1].status, "DIM");
    assert_eq!(dinner.contents[1].level(), 45);
    assert_eq!(document.scenes[1].scene_name, "Movie");
    assert_eq!(document.scenes[1].contents[0].level(), 0);

    assert_eq!(document.remote_controls.len(), 1);
    let remote = &document.remote_controls[0];
    assert_eq!(remote.remote_name, "Hall Remote");
    let links: Vec<(u32, LinkType, &str)> = remote
        .links
        .iter()
        .map(|l| (l.link_index, l.link_type, l.link_name.as_str()))
        .collect();
    assert_eq!(
        links,
        vec![
            (0, LinkType::Scene, "BRIGHT"),
            (1, LinkType::Group, "Kitchen"),
            (2, LinkType::DoNotDisturb, "DND"),
            (3, LinkType::Device, "Porch"),
        ]
    );
}

// TC-I-002: Keyword Dialect Workbook (auto-detected)
#[test]
fn test_keyword_workbook_document() {
    let converter = ConverterBuilder::new().build().unwrap();
    let excel_data = fixtures::generate_keyword_workbook().unwrap();

    let document = converter.parse_document(Cursor::new(excel_data)).unwrap();

    assert_eq!(document.devices.len(), 1);
    assert_eq!(document.devices[0].device_name, "Porch");
    let groups: Vec<&str> = document.groups.iter().map(|g| g.group_name.as_str()).collect();
    assert_eq!(groups, vec!["Hall"]);

    let scenes: Vec<(&str, Vec<i32>)> = document
        .scenes
        .iter()
        .map(|s| {
            (
                s.scene_name.as_str(),
                s.contents.iter().map(|c| c.level()).collect(),
            )
        })
        .collect();
    assert_eq!(scenes, vec![("BRIGHT", vec![100, 30]), ("ALL OFF", vec![0])]);

    assert_eq!(document.remote_controls[0].remote_name, "H2RSMB");
    assert_eq!(document.remote_controls[0].links.len(), 2);
}

// TC-I-003: Auto Detection Matches Fixed Dialect
#[test]
fn test_auto_detection_matches_fixed_dialect() {
    let excel_data = fixtures::generate_keyword_workbook().unwrap();

    let auto = ConverterBuilder::new()
        .build()
        .unwrap()
        .convert_to_string(Cursor::new(excel_data.clone()))
        .unwrap();
    let fixed = ConverterBuilder::new()
        .with_dialect(Dialect::Keyword)
        .build()
        .unwrap()
        .convert_to_string(Cursor::new(excel_data))
        .unwrap();

    assert_eq!(auto, fixed);
}

// TC-I-004: Exact Pretty Output
#[test]
fn test_pretty_output_shape() {
    let converter = ConverterBuilder::new().build().unwrap();
    let excel_data = fixtures::generate_single_sheet(
        "Programming Details",
        &[
            "REMOTE CONTROL LINK",
            "NAME: Hall",
            "BUTTON 4: GROUP Living Room",
        ],
    )
    .unwrap();

    let json = converter.convert_to_string(Cursor::new(excel_data)).unwrap();

    let expected = r#"{
    "devices": [],
    "groups": [],
    "scenes": [],
    "remoteControls": [
        {
            "remoteName": "Hall",
            "links": [
                {
                    "linkIndex": 3,
                    "linkType": 1,
                    "linkName": "Living Room"
                }
            ]
        }
    ]
}
"#;
    assert_eq!(json, expected);
}

// TC-I-005: Compact Output Round-Trips Through serde_json
#[test]
fn test_compact_output_is_valid_json() {
    let converter = ConverterBuilder::new()
        .with_output_format(OutputFormat::Compact)
        .build()
        .unwrap();
    let excel_data = fixtures::generate_prefixed_workbook().unwrap();

    let json = converter.convert_to_string(Cursor::new(excel_data)).unwrap();

    assert_eq!(json.lines().count(), 1);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["devices"][0]["appearanceShortname"], "KBSKTDIM");
    assert_eq!(value["groups"][0]["devices"], serde_json::json!([]));
    assert_eq!(value["scenes"][0]["contents"][1]["statusConditions"]["level"], 45);
    assert_eq!(value["remoteControls"][0]["links"][2]["linkType"], 3);
}

// TC-I-006: Sheet Selection by Exact Name
#[test]
fn test_sheet_selection_by_name() {
    let mut workbook = Workbook::new();
    let old = workbook.add_worksheet();
    old.set_name("Programming Details (old)").unwrap();
    fixtures::write_column(old, &["KASTA GROUP", "Old Hall"]).unwrap();
    let current = workbook.add_worksheet();
    current.set_name("Programming Details").unwrap();
    fixtures::write_column(current, &["KASTA GROUP", "New Hall"]).unwrap();
    let excel_data = workbook.save_to_buffer().unwrap();

    // 既定では名前に"Programming Details"を含む最初のシート
    let document = ConverterBuilder::new()
        .build()
        .unwrap()
        .parse_document(Cursor::new(excel_data.clone()))
        .unwrap();
    assert_eq!(document.groups[0].group_name, "Old Hall");

    let document = ConverterBuilder::new()
        .with_sheet_selector(SheetSelector::Name("Programming Details".to_string()))
        .build()
        .unwrap()
        .parse_document(Cursor::new(excel_data.clone()))
        .unwrap();
    assert_eq!(document.groups[0].group_name, "New Hall");

    let document = ConverterBuilder::new()
        .with_sheet_selector(SheetSelector::Index(1))
        .build()
        .unwrap()
        .parse_document(Cursor::new(excel_data))
        .unwrap();
    assert_eq!(document.groups[0].group_name, "New Hall");
}

// TC-I-007: Header Row Skip
#[test]
fn test_header_row_skip() {
    let excel_data =
        fixtures::generate_single_sheet("Programming Details", &["KASTA GROUP", "Hall"]).unwrap();

    let document = ConverterBuilder::new()
        .build()
        .unwrap()
        .parse_document(Cursor::new(excel_data.clone()))
        .unwrap();
    assert_eq!(document.groups.len(), 1);

    // 1行目のマーカーが見出しとして読み飛ばされ、"Hall"はセクション外になる
    let document = ConverterBuilder::new()
        .with_header_row(true)
        .build()
        .unwrap()
        .parse_document(Cursor::new(excel_data))
        .unwrap();
    assert!(document.is_empty());
}

// TC-I-008: Custom Sheet Pattern
#[test]
fn test_custom_sheet_pattern() {
    let excel_data =
        fixtures::generate_single_sheet("Site Programming", &["KASTA GROUP", "Hall"]).unwrap();

    let result = ConverterBuilder::new()
        .build()
        .unwrap()
        .parse_document(Cursor::new(excel_data.clone()));
    assert!(matches!(result, Err(ProgSheetError::NoProgrammingSheet { .. })));

    let document = ConverterBuilder::new()
        .with_sheet_selector(SheetSelector::Contains("Programming".to_string()))
        .build()
        .unwrap()
        .parse_document(Cursor::new(excel_data))
        .unwrap();
    assert_eq!(document.groups.len(), 1);
}

// TC-I-100: Invalid File Format
#[test]
fn test_invalid_file_format() {
    let converter = ConverterBuilder::new().build().unwrap();

    let invalid_input = b"This is not a spreadsheet".to_vec();
    let result = converter.convert_to_string(Cursor::new(invalid_input));

    match result {
        Err(ProgSheetError::Parse(_)) => {}
        other => panic!("Expected Parse error, got {:?}", other),
    }
}

// TC-I-101: No Programming Sheet
#[test]
fn test_no_programming_sheet() {
    let converter = ConverterBuilder::new().build().unwrap();
    let excel_data = fixtures::generate_single_sheet("Sheet1", &["KASTA GROUP", "Hall"]).unwrap();

    let result = converter.convert_to_string(Cursor::new(excel_data));

    match result {
        Err(e) => {
            assert!(e.is_no_data());
            assert!(e.to_string().contains("Programming Details"));
        }
        Ok(json) => panic!("Expected NoProgrammingSheet, got {}", json),
    }
}

// TC-I-102: Sheet Index Out of Range
#[test]
fn test_sheet_index_out_of_range() {
    let converter = ConverterBuilder::new()
        .with_sheet_selector(SheetSelector::Index(999))
        .build()
        .unwrap();
    let excel_data = fixtures::generate_prefixed_workbook().unwrap();

    let result = converter.parse_document(Cursor::new(excel_data));

    match result {
        Err(ProgSheetError::NoProgrammingSheet { selector }) => {
            assert_eq!(selector, "index 999");
        }
        other => panic!("Expected NoProgrammingSheet, got {:?}", other),
    }
}

// TC-I-103: File Not Found
#[test]
fn test_file_not_found() {
    let result = std::fs::File::open("nonexistent_programming.xlsx");
    let error: ProgSheetError = result.unwrap_err().into();
    assert!(matches!(error, ProgSheetError::Io(_)));
}
