//! Shared fixtures for unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::errors::TransportError;
use crate::models::RawPayload;
use crate::transport::Attempt;

/// Replays a fixed sequence of outcomes, then keeps failing with 500.
pub struct ScriptedAttempt {
    outcomes: Mutex<VecDeque<Result<RawPayload, TransportError>>>,
    calls: AtomicUsize,
}

impl ScriptedAttempt {
    pub fn new(outcomes: Vec<Result<RawPayload, TransportError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fails every attempt with the same error.
    pub fn always(error: TransportError) -> Self {
        Self::new(vec![Err(error); 16])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Attempt for ScriptedAttempt {
    async fn attempt(&self) -> Result<RawPayload, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(TransportError::status(500)))
    }
}

const COINS: [(&str, &str); 8] = [
    ("bitcoin", "Bitcoin"),
    ("ethereum", "Ethereum"),
    ("tether", "Tether"),
    ("binancecoin", "BNB"),
    ("solana", "Solana"),
    ("ripple", "XRP"),
    ("usd-coin", "USDC"),
    ("cardano", "Cardano"),
];

/// One upstream `/coins/markets` element, including fields the core drops.
///
/// The first entries are well-known coins; later ones are `coin-<index>`.
pub fn market_entry(index: usize) -> Value {
    let (id, name) = match COINS.get(index) {
        Some((id, name)) => (id.to_string(), name.to_string()),
        None => (format!("coin-{}", index), format!("Coin {}", index)),
    };
    let scale = 1_000.0 / (index + 1) as f64;
    json!({
        "id": id,
        "symbol": id.chars().take(3).collect::<String>(),
        "name": name,
        "image": format!("https://assets.coingecko.com/coins/images/{}/large/{}.png", index + 1, id),
        "current_price": 10.0 * scale,
        "market_cap": 1_000_000.0 * scale,
        "market_cap_rank": index + 1,
        "total_volume": 50_000.0 * scale,
        "price_change_percentage_24h": if index % 2 == 0 { 1.5 } else { -2.25 },
        "last_updated": "2024-05-01T12:00:00.000Z"
    })
}

/// A response body with `count` distinct assets in market-cap order.
pub fn markets_body(count: usize) -> String {
    let entries: Vec<Value> = (0..count).map(market_entry).collect();
    Value::Array(entries).to_string()
}
