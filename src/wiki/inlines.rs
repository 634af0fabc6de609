//! Inline Span Resolver
//!
//!     Turns the text of one line into a [Span](crate::wiki::ast::Span) tree. The resolver never
//!     sees more than a line and never looks at block structure; code and equation block bodies
//!     are not handed to it at all.
//!
//! Algorithm
//!
//!     A single left-to-right scan over a stack of open formatting frames (`**`, `//`, `__`).
//!     A marker whose kind is already open closes that frame; any frames opened after it are
//!     unwound into literal text. So `**a //b** c//` is bold `a //b` followed by the literal
//!     ` c//`. A frame with no content and a frame still open at end of line both turn back
//!     into their literal markers.
//!
//!     Links (`[[..]]`), inline equations (`$..$`, `$$..$$`) and literal runs (`%%..%%`) are
//!     captured whole, up to the first closing delimiter, before markers are considered.
//!     Equation source is not validated here: that happens only when a renderer asks for it.

pub mod links;
pub mod parser;

pub use links::parse_link;
pub use parser::resolve_spans;
