mod backend_selection;
mod helpers;
mod subscriptions;
mod unsubscribe;
