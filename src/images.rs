//! URL-to-bytes image loading with a budgeted in-memory cache. Failures
//! never escape this module; callers always get bytes or the placeholder.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{DynamicImage, Rgba, RgbaImage};
use tokio::sync::Mutex;

pub const DEFAULT_CACHE_BUDGET: usize = 20 * 1024 * 1024;

/// Fixed fallback returned whenever bytes are unavailable or undecodable.
pub fn placeholder_image() -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([128, 128, 128, 255])))
}

struct ByteCache {
    entries: HashMap<String, Vec<u8>>,
    order: VecDeque<String>,
    total: usize,
    budget: usize,
}

impl ByteCache {
    fn new(budget: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            total: 0,
            budget,
        }
    }

    fn get(&mut self, url: &str) -> Option<Vec<u8>> {
        if !self.entries.contains_key(url) {
            return None;
        }
        self.mark_recent(url);
        self.entries.get(url).cloned()
    }

    fn mark_recent(&mut self, url: &str) {
        if let Some(pos) = self.order.iter().position(|key| key == url) {
            if let Some(key) = self.order.remove(pos) {
                self.order.push_back(key);
            }
        }
    }

    fn insert(&mut self, url: String, bytes: Vec<u8>) {
        let cost = bytes.len();
        // An entry larger than the whole budget is served but never cached.
        if cost > self.budget {
            return;
        }

        if let Some(old) = self.entries.remove(&url) {
            self.total -= old.len();
            if let Some(pos) = self.order.iter().position(|key| *key == url) {
                self.order.remove(pos);
            }
        }

        while self.total + cost > self.budget {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            if let Some(evicted) = self.entries.remove(&oldest) {
                tracing::debug!(url = %oldest, cost = evicted.len(), "evicting cached image");
                self.total -= evicted.len();
            }
        }

        self.total += cost;
        self.order.push_back(url.clone());
        self.entries.insert(url, bytes);
    }
}

#[derive(Clone)]
pub struct ImageLoader {
    http_client: Arc<reqwest::Client>,
    cache: Arc<Mutex<ByteCache>>,
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoader {
    pub fn new() -> Self {
        Self::with_budget(DEFAULT_CACHE_BUDGET)
    }

    pub fn with_budget(budget: usize) -> Self {
        Self {
            http_client: Arc::new(reqwest::Client::new()),
            cache: Arc::new(Mutex::new(ByteCache::new(budget))),
        }
    }

    /// Raw encoded bytes for `url`, from cache when possible. `data:` URLs
    /// decode locally without touching the network. `None` on any failure.
    pub async fn load_bytes(&self, url: &str) -> Option<Vec<u8>> {
        if let Some(bytes) = self.cache.lock().await.get(url) {
            return Some(bytes);
        }

        let bytes = if url.starts_with("data:") {
            decode_data_url(url)?
        } else {
            self.fetch_bytes(url).await?
        };

        self.cache.lock().await.insert(url.to_string(), bytes.clone());
        Some(bytes)
    }

    /// Decoded image for `url`; degrades to [`placeholder_image`] instead of
    /// failing so a broken poster never takes a screen down with it.
    pub async fn load_image(&self, url: &str) -> DynamicImage {
        let Some(bytes) = self.load_bytes(url).await else {
            return placeholder_image();
        };
        image::load_from_memory(&bytes).unwrap_or_else(|e| {
            tracing::warn!(url, error = %e, "image decode failed");
            placeholder_image()
        })
    }

    async fn fetch_bytes(&self, url: &str) -> Option<Vec<u8>> {
        let response = match self.http_client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url, error = %e, "image fetch failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "image fetch refused");
            return None;
        }

        match response.bytes().await {
            Ok(bytes) => Some(bytes.to_vec()),
            Err(e) => {
                tracing::warn!(url, error = %e, "image body read failed");
                None
            }
        }
    }
}

// data:[<mediatype>][;base64],<payload> is decoded as base64 when the
// metadata segment says so, as percent-encoded text otherwise.
fn decode_data_url(url: &str) -> Option<Vec<u8>> {
    let rest = url.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    if meta.ends_with(";base64") {
        STANDARD.decode(payload).ok()
    } else {
        Some(percent_decode(payload))
    }
}

fn percent_decode(s: &str) -> Vec<u8> {
    let bytes = s.as_bytes();
    let mut result = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if let Some([b'%', hi, lo]) = bytes.get(i..i + 3) {
            let digits = ((*hi as char).to_digit(16), (*lo as char).to_digit(16));
            if let (Some(hi), Some(lo)) = digits {
                result.push((hi * 16 + lo) as u8);
                i += 3;
                continue;
            }
        }
        result.push(bytes[i]);
        i += 1;
    }
    result
}
