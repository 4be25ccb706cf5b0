//! Workbook Parser Module
//!
//! calamineを使用してワークブックを開き、対象シートのセル値を行優先の順序で取り出します。

use calamine::{open_workbook_auto_from_rs, Reader, Sheets};
use std::io::{Read, Seek};
use tracing::{debug, warn};

use crate::api::SheetSelector;
use crate::error::ProgSheetError;
use crate::types::CellValue;

/// ワークブックパーサー
///
/// calamineの`Sheets`のラッパーです。XLSX/XLS/XLSB/ODSのいずれも
/// calamineの自動判定で開きます。
pub(crate) struct WorkbookParser<RS: Read + Seek> {
    /// calamineのワークブック
    workbook: Sheets<RS>,
}

impl<RS: Read + Seek + Clone> WorkbookParser<RS> {
    /// ワークブックを開く
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - ワークブックの読み込みに成功した場合
    /// * `Err(ProgSheetError::Parse)` - スプレッドシートとして解釈できない場合
    pub fn open(reader: RS) -> Result<Self, ProgSheetError> {
        let workbook = open_workbook_auto_from_rs(reader)?;
        Ok(Self { workbook })
    }
}

impl<RS: Read + Seek> WorkbookParser<RS> {
    /// すべてのシート名を取得
    pub fn get_sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// シート選択方式に基づいて対象シートを1つ選ぶ
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 選択されたシート名
    /// * `Err(ProgSheetError::NoProgrammingSheet)` - 一致するシートがない場合
    pub fn select_sheet(&self, selector: &SheetSelector) -> Result<String, ProgSheetError> {
        let all_sheet_names = self.get_sheet_names();

        let selected = match selector {
            SheetSelector::Contains(pattern) => all_sheet_names
                .iter()
                .find(|name| name.contains(pattern.as_str()))
                .cloned(),
            SheetSelector::Name(name) => all_sheet_names.iter().find(|n| *n == name).cloned(),
            SheetSelector::Index(index) => all_sheet_names.get(*index).cloned(),
        };

        match selected {
            Some(name) => {
                debug!(sheet = %name, "programming sheet selected");
                Ok(name)
            }
            None => {
                warn!(
                    selector = %selector.describe(),
                    sheets = ?all_sheet_names,
                    "no matching worksheet"
                );
                Err(ProgSheetError::NoProgrammingSheet {
                    selector: selector.describe(),
                })
            }
        }
    }

    /// シートのセル値を行優先の順序で取り出す
    ///
    /// # 引数
    ///
    /// * `sheet_name` - シート名
    /// * `skip_header_row` - 使用範囲の1行目を列見出しとして読み飛ばすか
    pub fn read_cells(
        &mut self,
        sheet_name: &str,
        skip_header_row: bool,
    ) -> Result<Vec<CellValue>, ProgSheetError> {
        let range = self.workbook.worksheet_range(sheet_name)?;
        let skip = usize::from(skip_header_row);

        let cells: Vec<CellValue> = range
            .rows()
            .skip(skip)
            .flat_map(|row| row.iter().map(CellValue::from))
            .collect();

        debug!(
            sheet = %sheet_name,
            rows = range.height(),
            cols = range.width(),
            "cells extracted"
        );
        Ok(cells)
    }
}

// 実際のワークブックを使ったテストは統合テスト（tests/）で実装します。
