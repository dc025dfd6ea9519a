#![forbid(unsafe_code)]

//! Procedural generator for the airflow instrument panel SVG.
//!
//! The document is built as an in-memory [`Node`] tree by small component builders (fans, gauges,
//! status lamps, particle effects), then serialized with stable two-space indentation. External
//! behavior script and style text are embedded verbatim.
//!
//! ```no_run
//! let opts = airpanel::PanelOptions::from_resource_dir("res").with_seed(7);
//! airpanel::write_panel("te.svg", &opts)?;
//! # Ok::<(), airpanel::Error>(())
//! ```

pub mod config;
pub mod defs;
pub mod error;
pub mod fan;
pub mod fmt;
pub mod gauge;
pub mod geom;
pub mod node;
pub mod panel;
pub mod particles;
pub mod resources;
pub mod serialize;
pub mod status;

pub use config::PanelOptions;
pub use error::{Error, Result};
pub use node::{AttrValue, Attrs, Node, emit, emit_verbatim};
pub use panel::{build_panel, render_panel, write_panel};
pub use serialize::to_document_string;
