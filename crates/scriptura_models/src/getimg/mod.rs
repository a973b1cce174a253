//! getimg.ai diffusion API client.

mod client;

pub use client::{GETIMG_API_KEY_ENV, GetimgClient, ImageResult, fetch_image_data_uri};
