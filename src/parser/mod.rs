//! Parser Module
//!
//! calamineを使用したワークブックの読み込み。

mod workbook;

pub(crate) use workbook::WorkbookParser;
