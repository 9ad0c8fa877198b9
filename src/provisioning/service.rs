use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use super::allow_list::{normalize, CoupleEmails};
use crate::auth::IdentityProvider;
use crate::db::PairStore;
use crate::models::{IdentityUser, ProvisionResponse};
use crate::{AppError, AppResult};

/// Settings for linking the couple's accounts.
#[derive(Clone, Debug)]
pub struct ProvisioningConfig {
    pub couple: CoupleEmails,
    /// Where the sign-in link sends the browser.
    pub site_url: String,
}

/// Ensures both accounts exist and share one pair, then hands out a sign-in
/// link. Every step is idempotent, so a failed run is fixed by retrying.
pub struct ProvisioningService {
    identity: Arc<dyn IdentityProvider>,
    pairs: Arc<dyn PairStore>,
    config: ProvisioningConfig,
}

impl ProvisioningService {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        pairs: Arc<dyn PairStore>,
        config: ProvisioningConfig,
    ) -> Self {
        Self { identity, pairs, config }
    }

    pub async fn provision(&self, requested_email: &str) -> AppResult<ProvisionResponse> {
        let target = normalize(requested_email);
        if target.is_empty() {
            return Err(AppError::BadRequest("email required".to_string()));
        }
        if !self.config.couple.contains(&target) {
            tracing::warn!(email = %target, "Provisioning refused for address outside the couple");
            return Err(AppError::Forbidden("not allowed".to_string()));
        }

        let [first_email, second_email] = self.config.couple.both();
        let first = self.ensure_account(first_email).await?;
        let second = self.ensure_account(second_email).await?;

        let pair_id = match self.existing_pair(first.id, second.id).await? {
            Some(pair_id) => {
                tracing::debug!(pair_id = %pair_id, "Reusing existing pair");
                pair_id
            }
            None => self.create_pair().await?,
        };
        self.link_members(pair_id, first.id, second.id).await?;

        let link = self
            .identity
            .generate_magic_link(&target, &self.config.site_url)
            .await
            .map_err(AppError::into_downstream)?;

        metrics::counter!("provisioning_links_issued_total").increment(1);
        tracing::info!(email = %target, pair_id = %pair_id, "Sign-in link issued");

        Ok(ProvisionResponse { link, pair_id })
    }

    async fn ensure_account(&self, email: &str) -> AppResult<IdentityUser> {
        let existing = self
            .identity
            .find_user_by_email(email)
            .await
            .map_err(AppError::into_downstream)?;

        match existing {
            Some(user) => Ok(user),
            None => {
                let user = self
                    .identity
                    .create_confirmed_user(email)
                    .await
                    .map_err(AppError::into_downstream)?;
                metrics::counter!("provisioning_accounts_created_total").increment(1);
                Ok(user)
            }
        }
    }

    /// The pair to link the couple into: the oldest one they share, else the
    /// oldest one only they belong to (left half-linked by an interrupted run).
    async fn existing_pair(&self, first: Uuid, second: Uuid) -> AppResult<Option<Uuid>> {
        let first_pairs = self
            .pairs
            .pair_ids_for(first)
            .await
            .map_err(AppError::into_downstream)?;
        let second_pairs = self
            .pairs
            .pair_ids_for(second)
            .await
            .map_err(AppError::into_downstream)?;

        let second_set: HashSet<Uuid> = second_pairs.iter().copied().collect();
        let shared: Vec<Uuid> = first_pairs
            .iter()
            .copied()
            .filter(|p| second_set.contains(p))
            .collect();

        if shared.len() > 1 {
            tracing::warn!(shared = shared.len(), "Accounts share more than one pair; using the oldest");
        }
        if let Some(pair_id) = shared.first() {
            return Ok(Some(*pair_id));
        }

        for pair_id in first_pairs.iter().chain(second_pairs.iter()) {
            let members = self
                .pairs
                .members_of(*pair_id)
                .await
                .map_err(AppError::into_downstream)?;
            if members.iter().all(|m| *m == first || *m == second) {
                tracing::warn!(pair_id = %pair_id, "Completing half-linked pair");
                return Ok(Some(*pair_id));
            }
        }

        Ok(None)
    }

    async fn create_pair(&self) -> AppResult<Uuid> {
        let pair_id = self
            .pairs
            .create_pair()
            .await
            .map_err(AppError::into_downstream)?;

        metrics::counter!("provisioning_pairs_created_total").increment(1);
        tracing::info!(pair_id = %pair_id, "Pair created");
        Ok(pair_id)
    }

    /// Upserts both memberships; already-linked accounts are left as they are.
    async fn link_members(&self, pair_id: Uuid, first: Uuid, second: Uuid) -> AppResult<()> {
        for user_id in [first, second] {
            self.pairs
                .add_member(pair_id, user_id)
                .await
                .map_err(AppError::into_downstream)?;
        }
        Ok(())
    }
}
