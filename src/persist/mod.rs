use crate::api::{ApiClient, ApiErrorKind, ApiResult};
use crate::dnd::SortList;
use crate::toast::{dispatch_toast, Toast};
use leptos::task::spawn_local;

const SAVED_MESSAGE: &str = "Order updated!";
const FAILED_MESSAGE: &str = "Failed to save order";

/// Final order of one group at the moment a gesture ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PersistRequest {
    pub group_id: String,
    pub entry_ids: Vec<String>,
}

impl PersistRequest {
    pub fn from_list<L: SortList>(group_id: &str, list: &L) -> Self {
        Self {
            group_id: group_id.to_string(),
            entry_ids: list.entry_ids(),
        }
    }
}

/// Maps a finished round trip to the single toast it produces.
pub(crate) fn outcome_toast(outcome: &ApiResult<()>) -> Toast {
    match outcome {
        Ok(()) => Toast::success(SAVED_MESSAGE),
        Err(_) => Toast::error(FAILED_MESSAGE),
    }
}

/// Fire-and-forget order submission. Requests are never retried or
/// cancelled; overlapping calls for the same group resolve in arrival order.
#[derive(Clone, Debug)]
pub(crate) struct OrderPersister {
    client: ApiClient,
    toast_event: &'static str,
}

impl OrderPersister {
    pub fn new(client: ApiClient, toast_event: &'static str) -> Self {
        Self {
            client,
            toast_event,
        }
    }

    pub fn persist(&self, req: PersistRequest) {
        let client = self.client.clone();
        let toast_event = self.toast_event;
        spawn_local(async move {
            let outcome = client.reorder_group(&req.group_id, &req.entry_ids).await;
            if let Err(e) = &outcome {
                match e.kind {
                    ApiErrorKind::Network => leptos::logging::error!(
                        "could not reach server to save order for group {}: {}",
                        req.group_id,
                        e
                    ),
                    ApiErrorKind::Http => leptos::logging::error!(
                        "server rejected order for group {}: {}",
                        req.group_id,
                        e
                    ),
                }
            }

            let toast = outcome_toast(&outcome);
            leptos::logging::log!(
                "order save for group {}: {}",
                req.group_id,
                toast.kind.as_ref()
            );
            dispatch_toast(toast_event, &toast);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ReorderRequest};
    use crate::toast::ToastKind;

    #[test]
    fn test_request_reflects_final_list_order() {
        let list: Vec<String> = vec!["B".into(), "C".into(), "A".into()];
        let req = PersistRequest::from_list("1", &list);
        assert_eq!(req.group_id, "1");
        assert_eq!(req.entry_ids, vec!["B", "C", "A"]);

        let body = serde_json::to_string(&ReorderRequest {
            entry_ids: req.entry_ids,
        })
        .expect("should serialize");
        assert_eq!(body, r#"{"entry_ids":["B","C","A"]}"#);
    }

    #[test]
    fn test_outcome_toast_success() {
        let t = outcome_toast(&Ok(()));
        assert_eq!(t.kind, ToastKind::Success);
        assert_eq!(t.message, "Order updated!");
    }

    #[test]
    fn test_outcome_toast_server_error_is_failure() {
        let err = ApiError {
            kind: ApiErrorKind::Http,
            message: "Reorder failed (500 Internal Server Error): ".to_string(),
        };
        let t = outcome_toast(&Err(err));
        assert_eq!(t.kind, ToastKind::Error);
        assert_eq!(t.message, "Failed to save order");
    }

    #[test]
    fn test_outcome_toast_network_error_is_failure() {
        let err = ApiError {
            kind: ApiErrorKind::Network,
            message: "error sending request".to_string(),
        };
        assert_eq!(outcome_toast(&Err(err)).kind, ToastKind::Error);
    }
}
