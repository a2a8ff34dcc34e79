//! Arithmetic captcha guarding the public vendor quote portal.
//!
//! Challenges are single-digit additions with a five minute lifetime.
//! A challenge is consumed on the first correct answer; wrong answers
//! leave it in place so the vendor can retry until it expires.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use procura_model::new_id;
use rand::Rng;
use serde::Serialize;

/// How long a challenge stays answerable
const CAPTCHA_TTL_MINUTES: i64 = 5;

/// A challenge handed to the vendor portal
#[derive(Debug, Clone, Serialize)]
pub struct CaptchaChallenge {
    pub id: String,
    pub question: String,
}

#[derive(Debug, Clone)]
struct CaptchaEntry {
    answer: u32,
    expires_at: DateTime<Utc>,
}

/// In-memory captcha challenge store.
///
/// Lock discipline mirrors the main store: take the guard, do the work,
/// drop it. Expired entries are pruned on every access.
#[derive(Debug, Default)]
pub struct CaptchaStore {
    entries: Mutex<HashMap<String, CaptchaEntry>>,
}

impl CaptchaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh challenge
    pub fn challenge(&self) -> CaptchaChallenge {
        let mut rng = rand::thread_rng();
        let a: u32 = rng.gen_range(1..=9);
        let b: u32 = rng.gen_range(1..=9);

        let mut entries = self.entries.lock().unwrap();
        prune(&mut entries);

        let id = new_id();
        entries.insert(
            id.clone(),
            CaptchaEntry {
                answer: a + b,
                expires_at: Utc::now() + Duration::minutes(CAPTCHA_TTL_MINUTES),
            },
        );
        CaptchaChallenge {
            id,
            question: format!("What is {a} + {b}?"),
        }
    }

    /// Check an answer. Consumes the challenge when correct.
    pub fn validate(&self, id: &str, answer: u32) -> bool {
        let mut entries = self.entries.lock().unwrap();
        prune(&mut entries);

        let ok = entries
            .get(id)
            .map_or(false, |entry| entry.answer == answer);
        if ok {
            entries.remove(id);
        }
        ok
    }
}

fn prune(entries: &mut HashMap<String, CaptchaEntry>) {
    let now = Utc::now();
    entries.retain(|_, entry| entry.expires_at > now);
}
