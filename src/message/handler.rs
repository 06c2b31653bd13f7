pub(super) mod api {
    use axum::{
        Extension, Json,
        extract::{OriginalUri, Path, State},
        response::IntoResponse,
    };
    use axum_extra::extract::Query;
    use serde::Deserialize;

    use crate::{auth, message, message::model::MessageDto, pagination, thread};

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SendParams {
        #[serde(default)]
        user_to: String,
        #[serde(default)]
        content: String,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MarkReadParams {
        #[serde(default)]
        message_ids: Vec<String>,
    }

    pub async fn inbox(
        auth_user: Extension<auth::User>,
        thread_service: State<thread::Service>,
        OriginalUri(uri): OriginalUri,
        Query(params): Query<pagination::Params>,
    ) -> crate::Result<impl IntoResponse> {
        let page = thread_service
            .inbox(auth_user.id(), &params.into())
            .await?;

        Ok((page.headers(uri.path()), Json(page.items)))
    }

    pub async fn send(
        auth_user: Extension<auth::User>,
        message_service: State<message::Service>,
        Json(params): Json<SendParams>,
    ) -> crate::Result<Json<MessageDto>> {
        let msg = message_service
            .send(auth_user.id(), &params.user_to, &params.content)
            .await?;

        Ok(Json(msg))
    }

    pub async fn find_thread(
        auth_user: Extension<auth::User>,
        Path(user_id): Path<String>,
        message_service: State<message::Service>,
        OriginalUri(uri): OriginalUri,
        Query(params): Query<pagination::Params>,
    ) -> crate::Result<impl IntoResponse> {
        let page = message_service
            .find_thread(auth_user.id(), &user_id, &params.into())
            .await?;

        Ok((page.headers(uri.path()), Json(page.items)))
    }

    pub async fn mark_read(
        auth_user: Extension<auth::User>,
        message_service: State<message::Service>,
        Json(params): Json<MarkReadParams>,
    ) -> crate::Result<()> {
        message_service
            .mark_read(auth_user.id(), &params.message_ids)
            .await?;

        Ok(())
    }
}
