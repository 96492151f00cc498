use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ring::rand::{SecureRandom, SystemRandom};

/// Number of random bytes behind one GUID. Nine bytes encode to twelve characters.
const GUID_BYTES: usize = 9;

/// Source of fresh GUIDs for new bookmark rows.
pub trait GuidGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Twelve-character, URL-safe GUIDs from the system CSPRNG.
pub struct RandomGuidGenerator {
    rng: SystemRandom,
}

impl RandomGuidGenerator {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl Default for RandomGuidGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl GuidGenerator for RandomGuidGenerator {
    fn generate(&self) -> String {
        let mut bytes = [0u8; GUID_BYTES];
        if self.rng.fill(&mut bytes).is_err() {
            // SystemRandom only fails when the OS entropy source is unavailable.
            let nanos = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
                .to_le_bytes();
            bytes.copy_from_slice(&nanos[..GUID_BYTES]);
        }
        URL_SAFE_NO_PAD.encode(bytes)
    }
}
