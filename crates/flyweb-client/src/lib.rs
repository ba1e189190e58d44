//! # flyweb-client — Consumer-Side Protocol Helpers
//!
//! Discover a site's FlyWeb document and fetch its declared resources over
//! HTTP. Everything here sits on the *read path* of the protocol: a fetched
//! document that fails validation is a hard error ([`ClientError::InvalidDocument`]
//! carries the full violation list), unlike the serving adapters, which only
//! warn.
//!
//! ```no_run
//! # async fn example() -> Result<(), flyweb_client::ClientError> {
//! use flyweb_client::{FetchOptions, FlywebClient};
//!
//! let client = FlywebClient::new()?;
//! let site = client.discover("https://example.com").await?;
//! println!("{} exposes: {:?}", site.document.entity, site.document.resources.keys());
//!
//! let posts = &site.document.resources["posts"];
//! let records = client
//!     .fetch_resource("https://example.com", posts, &FetchOptions::default())
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;

pub use client::{well_known_url, Discovery, FetchOptions, FlywebClient};
pub use error::ClientError;
