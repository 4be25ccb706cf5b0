//! progsheet - Convert automation "programming details" spreadsheets into normalized JSON
//!
//! This crate reads the programming sheet of a lighting/automation installation
//! export (XLSX, XLS, XLSB or ODS), splits its free-text cells into device, group,
//! scene and remote-control sections, and renders the result as a JSON document.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use progsheet::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a converter with default settings
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     let input = File::open("programming.xlsx")?;
//!     let output = File::create("programming.json")?;
//!
//!     converter.convert(input, output)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Working with the Document
//!
//! ```rust,no_run
//! use std::fs::File;
//! use progsheet::{ConverterBuilder, Dialect, SheetSelector};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new()
//!         .with_sheet_selector(SheetSelector::Index(0))
//!         .with_dialect(Dialect::Keyword)
//!         .build()?;
//!
//!     let document = converter.parse_document(File::open("programming.xlsx")?)?;
//!     for remote in &document.remote_controls {
//!         println!("{}: {} buttons", remote.remote_name, remote.links.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Without a Workbook
//!
//! The token pipeline is usable on its own:
//!
//! ```rust
//! use progsheet::ConverterBuilder;
//!
//! # fn main() -> Result<(), progsheet::ProgSheetError> {
//! let converter = ConverterBuilder::new().build()?;
//! let document = converter.parse_texts([
//!     "KASTA SCENE",
//!     "NAME: Movie Night\nCONTROL CONTENT:\nLamp3 DIM + 45%",
//! ]);
//! assert_eq!(document.scenes[0].scene_name, "Movie Night");
//! assert_eq!(document.scenes[0].contents[0].level(), 45);
//! # Ok(())
//! # }
//! ```

mod api;
mod builder;
mod dialect;
mod error;
mod output;
mod parser;
mod pipeline;
mod security;
mod types;

// 公開API
pub use api::{
    Dialect, DialectSelector, OutputFormat, SheetSelector, DEFAULT_SHEET_PATTERN,
};
pub use builder::{Converter, ConverterBuilder};
pub use dialect::{
    DialectConfig, GroupRule, LinkRule, NameDelimiter, RuleAction, SectionMarkers,
    TokenPredicate,
};
pub use error::ProgSheetError;
pub use pipeline::{
    parse_button_line, parse_devices, parse_groups, parse_remote_controls, parse_scene_line,
    parse_scenes, parse_sections, split_sections, NormalizerConfig, SectionTokens,
    TokenNormalizer,
};
pub use types::{
    Device, Group, Link, LinkType, ProgrammingDocument, RemoteControl, Scene, SceneContent,
    Section, StatusConditions,
};
