pub(super) mod api {
    use axum::{Extension, Json, extract::State};

    use crate::{
        auth,
        thread::{self, model::UnreadCount},
    };

    pub async fn count_unread(
        auth_user: Extension<auth::User>,
        thread_service: State<thread::Service>,
    ) -> crate::Result<Json<UnreadCount>> {
        let unread = thread_service.count_unread(auth_user.id()).await?;
        Ok(Json(UnreadCount { unread }))
    }
}
