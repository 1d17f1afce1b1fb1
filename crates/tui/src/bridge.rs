//! Channel-backed collaborator implementations.
//!
//! Actions run on spawned tasks while the event loop keeps polling the
//! terminal. These bridges carry confirmation requests, error messages, and
//! UI intents from the running action back into the loop, where the next
//! tick drains them.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use actions::collab::{ConfirmDialog, ConfirmRequest, Confirmation, ErrorSink, IntentSink, UiIntent};

use crate::state::PendingConfirm;

pub struct ChannelConfirm {
    tx: mpsc::UnboundedSender<PendingConfirm>,
}

#[async_trait]
impl ConfirmDialog for ChannelConfirm {
    async fn confirm(&self, request: ConfirmRequest) -> Confirmation {
        let (reply, answer) = oneshot::channel();
        if self.tx.send(PendingConfirm { request, reply }).is_err() {
            return Confirmation::Cancelled;
        }
        // A dropped modal (app shutting down) reads as a cancel.
        answer.await.unwrap_or(Confirmation::Cancelled)
    }
}

pub struct ChannelErrors {
    tx: mpsc::UnboundedSender<String>,
}

impl ErrorSink for ChannelErrors {
    fn report(&self, message: String) {
        let _ = self.tx.send(message);
    }
}

pub struct ChannelIntents {
    tx: mpsc::UnboundedSender<UiIntent>,
}

impl IntentSink for ChannelIntents {
    fn send(&self, intent: UiIntent) {
        let _ = self.tx.send(intent);
    }
}

pub struct BridgeReceivers {
    pub confirms: mpsc::UnboundedReceiver<PendingConfirm>,
    pub errors: mpsc::UnboundedReceiver<String>,
    pub intents: mpsc::UnboundedReceiver<UiIntent>,
    pub error_tx: mpsc::UnboundedSender<String>,
}

pub fn channels() -> (ChannelConfirm, ChannelErrors, ChannelIntents, BridgeReceivers) {
    let (confirm_tx, confirms) = mpsc::unbounded_channel();
    let (error_tx, errors) = mpsc::unbounded_channel();
    let (intent_tx, intents) = mpsc::unbounded_channel();
    (
        ChannelConfirm { tx: confirm_tx },
        ChannelErrors {
            tx: error_tx.clone(),
        },
        ChannelIntents { tx: intent_tx },
        BridgeReceivers {
            confirms,
            errors,
            intents,
            error_tx,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_confirm_round_trip() {
        let (confirm, _errors, _intents, mut rx) = channels();
        let ask = tokio::spawn(async move {
            confirm
                .confirm(ConfirmRequest::new("Delete", "Really?"))
                .await
        });
        let pending = rx.confirms.recv().await.unwrap();
        assert_eq!(pending.request.title, "Delete");
        pending.reply.send(Confirmation::Confirmed).unwrap();
        assert_eq!(ask.await.unwrap(), Confirmation::Confirmed);
    }

    #[tokio::test]
    async fn test_dropped_reply_reads_as_cancel() {
        let (confirm, _errors, _intents, mut rx) = channels();
        let ask = tokio::spawn(async move {
            confirm
                .confirm(ConfirmRequest::new("Delete", "Really?"))
                .await
        });
        let pending = rx.confirms.recv().await.unwrap();
        drop(pending.reply);
        assert_eq!(ask.await.unwrap(), Confirmation::Cancelled);
    }
}
