//! Admin member directory: list, search by name, and details.

use std::sync::Arc;

use super::state::{ViewHandle, ViewState};
use crate::api::models::Member;
use crate::traits::LibraryApi;

pub const LOAD_FAILED: &str = "Failed to fetch members. Please ensure the backend is running.";
pub const DETAILS_FAILED: &str = "Failed to fetch member details";

pub struct MembersViewModel<A: LibraryApi> {
    api: Arc<A>,
    handle: ViewHandle,
    state: ViewState<Vec<Member>>,
    /// Active name filter, `None` when listing everyone.
    query: Option<String>,
    selected: ViewState<Member>,
}

impl<A: LibraryApi> MembersViewModel<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            handle: ViewHandle::new(),
            state: ViewState::Idle,
            query: None,
            selected: ViewState::Idle,
        }
    }

    pub fn state(&self) -> &ViewState<Vec<Member>> {
        &self.state
    }

    pub fn members(&self) -> Option<&[Member]> {
        self.state.snapshot().map(Vec::as_slice)
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn selected(&self) -> &ViewState<Member> {
        &self.selected
    }

    pub fn handle(&self) -> ViewHandle {
        self.handle.clone()
    }

    /// GET /api/members, or the search endpoint when a filter is active.
    pub async fn load(&mut self) {
        if !self.handle.is_active() {
            return;
        }
        self.state = ViewState::Loading;
        let result = match &self.query {
            Some(name) => self.api.search_members(name).await,
            None => self.api.list_members().await,
        };
        if !self.handle.is_active() {
            tracing::debug!("Members view torn down, dropping response");
            return;
        }
        if let Err(e) = &result {
            tracing::warn!("Loading members failed: {}", e);
        }
        self.state = ViewState::settle(result, LOAD_FAILED);
    }

    /// Filter by name. A blank name goes back to the full list.
    pub async fn search(&mut self, name: &str) {
        let name = name.trim();
        self.query = (!name.is_empty()).then(|| name.to_string());
        self.load().await;
    }

    /// Fetch one member's details into [`Self::selected`].
    pub async fn select(&mut self, member_id: i64) {
        if !self.handle.is_active() {
            return;
        }
        self.selected = ViewState::Loading;
        let result = self.api.member(member_id).await;
        if !self.handle.is_active() {
            return;
        }
        if let Err(e) = &result {
            tracing::warn!("Loading member {} failed: {}", member_id, e);
        }
        self.selected = ViewState::settle(result, DETAILS_FAILED);
    }

    pub fn clear_selection(&mut self) {
        self.selected = ViewState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockLibraryApi, RecordedCall};
    use crate::api::ApiError;

    fn member(id: i64, name: &str) -> Member {
        Member {
            id,
            name: name.to_string(),
            email: None,
            username: None,
            address: None,
            contact_info: None,
            registration_date: None,
            membership_expiry_date: None,
        }
    }

    fn view(api: &MockLibraryApi) -> MembersViewModel<MockLibraryApi> {
        MembersViewModel::new(Arc::new(api.clone()))
    }

    #[tokio::test]
    async fn test_list_and_search() {
        let api = MockLibraryApi::new();
        api.push_members(Ok(vec![member(1, "Alice"), member(2, "Bob")]));
        api.push_search(Ok(vec![member(2, "Bob")]));
        let mut vm = view(&api);

        vm.load().await;
        assert_eq!(vm.members().map(<[Member]>::len), Some(2));

        vm.search(" Bob ").await;
        assert_eq!(vm.query(), Some("Bob"));
        assert_eq!(vm.members(), Some(&[member(2, "Bob")][..]));

        vm.search("").await;
        assert!(vm.query().is_none());
        assert_eq!(
            api.calls(),
            vec![
                RecordedCall::ListMembers,
                RecordedCall::SearchMembers("Bob".to_string()),
                RecordedCall::ListMembers,
            ]
        );
    }

    #[tokio::test]
    async fn test_load_failure_message() {
        let api = MockLibraryApi::new();
        api.push_members(Err(ApiError::network("refused")));
        let mut vm = view(&api);
        vm.load().await;
        assert_eq!(vm.state().error().unwrap().message, LOAD_FAILED);
    }

    #[tokio::test]
    async fn test_select_and_clear() {
        let api = MockLibraryApi::new();
        api.push_member(Ok(member(7, "Grace")));
        let mut vm = view(&api);

        vm.select(7).await;
        assert_eq!(vm.selected().snapshot(), Some(&member(7, "Grace")));
        vm.clear_selection();
        assert!(vm.selected().is_idle());
    }

    #[tokio::test]
    async fn test_select_not_found() {
        let api = MockLibraryApi::new();
        api.push_member(Err(ApiError::from_response(404, "")));
        let mut vm = view(&api);
        vm.select(99).await;
        assert_eq!(vm.selected().error().unwrap().message, DETAILS_FAILED);
        assert_eq!(vm.selected().error().unwrap().status, Some(404));
    }
}
