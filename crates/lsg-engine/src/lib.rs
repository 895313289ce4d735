//! Living style guide engine.
//!
//! Turns a stylesheet into a style guide page. The stylesheet is compiled,
//! its import tree flattened into the files it uses, each file's sibling
//! markdown fragment discovered, and the fragments concatenated, converted
//! to HTML and placed in a page template next to the compiled CSS.
//!
//! ```text
//! scss/styleguide.scss   @import "buttons";
//! scss/_buttons.scss     .button { ... }
//! scss/_buttons.md       # Buttons ...
//! ```
//!
//! [`Engine`] holds one render and memoizes every stage of it. The
//! collaborators it drives sit behind traits: [`lsg_sass::StylesheetCompiler`],
//! [`FragmentResolver`] and [`MarkupConverter`].

mod aggregator;
mod converter;
mod engine;
mod error;
mod resolver;
mod template;
mod walker;

pub use aggregator::aggregate;
pub use converter::{ConversionError, LivingStyleGuideConverter, MarkupConverter};
pub use engine::Engine;
pub use error::EngineError;
pub use resolver::{
    FRAGMENT_EXTENSION, FileList, FragmentResolver, GlobFragmentResolver, fragment_path,
};
pub use template::{PageBindings, Template, TemplateError, footer, head, header, javascript_tag};
pub use walker::{flatten, is_stylesheet};
