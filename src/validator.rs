//! On-chain confirmation of candidate networks.

use crate::chain::ChainClient;
use crate::effect::{Effect, EffectInterpreter, GenealogyError};
use crate::store::RecordStore;
use crate::types::Network;

/// Return the first candidate whose recorded historic block matches the
/// live chain, or `None` when no candidate matches.
///
/// Candidates are checked in list order and the first match wins: no
/// further candidates are queried after a confirmation. A chain with no
/// block at the candidate's height is a legitimate non-match, as is a hash
/// mismatch; only a chain client failure is an error.
pub async fn first_confirmed<S: RecordStore, C: ChainClient>(
    interpreter: &EffectInterpreter<S, C>,
    candidates: &[Network],
) -> Result<Option<Network>, GenealogyError> {
    for candidate in candidates {
        let height = candidate.historic_block.height;
        let block = interpreter
            .perform(Effect::chain_query(height))
            .await?
            .into_block()?;

        match block {
            Some(header) if candidate.historic_block.same_hash(&header.hash) => {
                tracing::debug!(network = %candidate.id, height, "candidate confirmed on-chain");
                return Ok(Some(candidate.clone()));
            }
            // Mismatched hash or chain shorter than the recorded height
            _ => continue,
        }
    }
    Ok(None)
}
