use accounts_core::{
    Account, AccountError, LifecycleEvent, LifecycleLinks, NotificationDispatcher, TokenCodec,
    TokenPurpose,
};
use chrono::Duration;

/// Issues a lifecycle token for `account` and hands the resulting event to the
/// dispatcher. A dispatch failure becomes [`AccountError::NotificationFailed`];
/// whatever state change preceded the call stays in place.
pub(crate) async fn issue_and_dispatch<T, N>(
    tokens: &T,
    dispatcher: &N,
    links: &LifecycleLinks,
    account: &Account,
    purpose: TokenPurpose,
    ttl: Duration,
) -> Result<(), AccountError>
where
    T: TokenCodec,
    N: NotificationDispatcher,
{
    let token = tokens.issue(&account.id, purpose, ttl)?;
    let link = links.link_for(purpose, &token);
    let event = LifecycleEvent::new(purpose.into(), account.email.clone(), &account.username, link);

    dispatcher.dispatch(&event).await.map_err(|e| {
        tracing::error!(
            account_id = %account.id,
            purpose = %purpose,
            error = %e,
            "Lifecycle notification was not dispatched"
        );
        AccountError::NotificationFailed {
            account_id: account.id.clone(),
            reason: e.to_string(),
        }
    })
}
