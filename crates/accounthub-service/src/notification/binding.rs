//! Binds a delivery channel to a user.

use std::sync::Arc;

use tracing::{info, warn};

use accounthub_core::error::AppError;
use accounthub_core::result::AppResult;
use accounthub_database::store::NotificationTargetStore;
use accounthub_entity::notification::{NotificationChannel, NotificationTarget};

use crate::context::RequestContext;

/// Manages the single notification target each user may have.
///
/// "No target" is the absence of a row, never a stored `none` channel.
#[derive(Clone)]
pub struct NotificationTargetBinding {
    /// Target store.
    targets: Arc<dyn NotificationTargetStore>,
}

impl std::fmt::Debug for NotificationTargetBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationTargetBinding")
            .finish_non_exhaustive()
    }
}

impl NotificationTargetBinding {
    /// Creates a new binding service.
    pub fn new(targets: Arc<dyn NotificationTargetStore>) -> Self {
        Self { targets }
    }

    /// Sets the caller's target, replacing any existing one.
    pub async fn set_target(
        &self,
        ctx: &RequestContext,
        channel: NotificationChannel,
    ) -> AppResult<NotificationTarget> {
        if channel.is_none() {
            return Err(AppError::validation(
                "Use clear_target to remove the notification target",
            ));
        }

        let target = self.targets.upsert(ctx.user_id, channel).await?;
        info!(user_id = ctx.user_id, channel = %channel, "Notification target set");
        Ok(target)
    }

    /// Removes the caller's target. Returns `true` if one existed.
    pub async fn clear_target(&self, ctx: &RequestContext) -> AppResult<bool> {
        let removed = self.targets.delete(ctx.user_id).await?;
        if removed {
            info!(user_id = ctx.user_id, "Notification target cleared");
        }
        Ok(removed)
    }

    /// The caller's current target, if any.
    pub async fn target(&self, ctx: &RequestContext) -> AppResult<Option<NotificationTarget>> {
        self.targets.find(ctx.user_id).await
    }

    /// Points every undelivered notification of the caller at `channel`.
    /// Returns how many were updated.
    pub async fn propagate(
        &self,
        ctx: &RequestContext,
        channel: NotificationChannel,
    ) -> AppResult<u64> {
        let updated = self.targets.retarget_pending(ctx.user_id, channel).await?;
        info!(
            user_id = ctx.user_id,
            channel = %channel,
            updated,
            "Pending notifications retargeted"
        );
        Ok(updated)
    }

    /// Applies a target change requested by the caller.
    ///
    /// `None` clears the target. Any other channel is set and then
    /// propagated to pending notifications; a propagation failure is logged
    /// and does not undo the new target.
    pub async fn update_target(
        &self,
        ctx: &RequestContext,
        channel: NotificationChannel,
    ) -> AppResult<Option<NotificationTarget>> {
        if channel.is_none() {
            self.clear_target(ctx).await?;
            return Ok(None);
        }

        let target = self.set_target(ctx, channel).await?;
        if let Err(e) = self.propagate(ctx, channel).await {
            warn!(
                user_id = ctx.user_id,
                channel = %channel,
                error = %e,
                "Failed to retarget pending notifications"
            );
        }
        Ok(Some(target))
    }
}
