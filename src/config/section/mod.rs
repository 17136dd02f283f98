//! Configuration section definitions.
//!
//! Each module corresponds to a section in `siteswap.toml`:
//!
//! | Module    | TOML Section | Purpose                          |
//! |-----------|--------------|----------------------------------|
//! | `publish` | `[publish]`  | Published directory, cache tags  |
//! | `serve`   | `[serve]`    | Admin and public HTTP servers    |

mod publish;
mod serve;

pub use publish::PublishConfig;
pub use serve::ServeConfig;
