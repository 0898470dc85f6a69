use anyhow::Context;
use chrono::{DateTime, TimeDelta, Utc};
use dash::Dashboard;
use dash::kernel::prelude::*;
use tracing::info;

/// Drives every configured module through the bus the way a user clicking
/// through the dashboard would.
pub(crate) fn replay(dashboard: &Dashboard) -> anyhow::Result<()> {
    dashboard.navigate(View::Users);

    if let Some(users) = dashboard.users() {
        let ada = users.create("Ada Lovelace", "ada@example.com")?;
        users.select(&ada.id)?;
        users.update(User { email: "ada@analytical.engine".into(), ..ada.clone() })?;

        if let Some(notifications) = dashboard.notifications() {
            notifications.notify(format!("{} was added", ada.name), Severity::Success);
        }

        let first = users.users().first().map(|u| u.id.clone()).context("seeded user list")?;
        users.delete(&first)?;
        users.clear_selection();
    }

    dashboard.theme().toggle();
    dashboard.navigate(View::Analytics);

    if let Some(analytics) = dashboard.analytics() {
        info!(before = ?analytics.snapshot(), "Refreshing analytics");
        analytics.refresh();
    }

    if let Some(notifications) = dashboard.notifications() {
        dashboard.navigate(View::Notifications);
        notifications.notify("Nightly export failed", Severity::Error);

        if let Some(oldest) = notifications.list().first() {
            notifications.dismiss(&oldest.id);
        }
        let dismiss_after = dashboard.config().notifications.dismiss_after();
        let horizon = TimeDelta::from_std(dismiss_after)
            .ok()
            .and_then(|delta| Utc::now().checked_add_signed(delta))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let pruned = notifications.prune_expired(horizon);
        info!(pruned, "Expired notifications cleared");
    }

    Ok(())
}
