//! Adapters for the network and desktop ports.

mod reqwest_transport;
mod system_browser;

pub use reqwest_transport::ReqwestTransport;
pub use system_browser::SystemBrowser;
