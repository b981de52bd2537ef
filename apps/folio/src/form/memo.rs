use std::sync::Arc;

use tracing::debug;

use crate::form::assemble_payload;
use crate::models::payload::Payload;
use crate::models::profile::FormState;

/// Caches the last assembled payload, keyed on the form it was built from.
#[derive(Debug, Default)]
pub struct PayloadMemo {
    cached: Option<(FormState, Arc<Payload>)>,
    recomputations: u64,
}

impl PayloadMemo {
    /// Returns the payload for `form`, assembling it only when the form
    /// differs from the one seen last time.
    pub fn get(&mut self, form: &FormState) -> Arc<Payload> {
        if let Some((key, payload)) = &self.cached {
            if key == form {
                return Arc::clone(payload);
            }
        }

        let payload = Arc::new(assemble_payload(form));
        self.recomputations += 1;
        debug!(recomputations = self.recomputations, "Payload reassembled");
        self.cached = Some((form.clone(), Arc::clone(&payload)));
        payload
    }

    #[cfg(test)]
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}
