//! Text and image provider integrations for Scriptura.
//!
//! # Available Providers
//!
//! - **Gemini** (Google) - text generation through [`GeminiClient`]
//! - **getimg.ai** - Stable Diffusion XL images through [`GetimgClient`]
//!
//! Both read their API keys from the environment (`GEMINI_API_KEY`,
//! `GETIMG_API_KEY`) unless one is passed explicitly.
//!
//! # Example
//!
//! ```no_run
//! use scriptura_models::GeminiClient;
//! use scriptura_interface::ScripturaDriver;
//! use scriptura_core::{GenerateRequest, Message};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new("gemini-2.0-flash")?;
//! let request = GenerateRequest::builder()
//!     .messages(vec![Message::user("Hello")])
//!     .build()?;
//! let response = client.generate(&request).await?;
//! # Ok(())
//! # }
//! ```

mod gemini;
mod getimg;

pub use gemini::{GEMINI_API_KEY_ENV, GeminiClient, GeminiResult, shared_gemini};
pub use getimg::{GETIMG_API_KEY_ENV, GetimgClient, ImageResult, fetch_image_data_uri};
