//! PageRelay page backend over the Chrome DevTools Protocol (CDP).
//!
//! Connects to a running Chrome/Edge instance via WebSocket and exposes one
//! attached tab as a [`pagerelay_protocols::PageBackend`]. Pure Rust, no
//! browser bundled - the user's own browser (with its logins) does the work.
//!
//! ## Setup
//!
//! Start Chrome with remote debugging enabled:
//!
//! ```bash
//! google-chrome --remote-debugging-port=9222
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let client = CdpClient::connect("http://127.0.0.1:9222").await?;
//! let page = client.open_page("https://chat.qwen.ai/").await?;
//! let backend = CdpPage::attach(page).await?;
//! ```

mod backend;
mod client;
mod error;
mod protocol;
mod session;

pub use backend::{CdpPage, PageMetadata};
pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::{BrowserVersion, PageInfo, RemoteObject, TargetInfo};
pub use session::PageSession;
