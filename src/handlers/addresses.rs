use actix_web::{web, HttpResponse};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::domain::address::{Address, AddressFields, AddressPatch};
use crate::errors::AppError;
use crate::state::AppState;

use super::blocking;

// ── Request / response DTOs ──────────────────────────────────────────────────

/// Address fields as sent by clients; also used for the shipping snapshot on orders.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddressBody {
    pub first_name: String,
    pub last_name: String,
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub landmark: String,
    pub zip_code: i32,
    pub state: String,
    pub country: String,
    /// Up to 10 digits
    pub mobile: String,
}

impl From<AddressBody> for AddressFields {
    fn from(b: AddressBody) -> Self {
        Self {
            first_name: b.first_name,
            last_name: b.last_name,
            line1: b.line1,
            line2: b.line2,
            landmark: b.landmark,
            zip_code: b.zip_code,
            state: b.state,
            country: b.country,
            mobile: b.mobile,
        }
    }
}

impl From<AddressFields> for AddressBody {
    fn from(f: AddressFields) -> Self {
        Self {
            first_name: f.first_name,
            last_name: f.last_name,
            line1: f.line1,
            line2: f.line2,
            landmark: f.landmark,
            zip_code: f.zip_code,
            state: f.state,
            country: f.country,
            mobile: f.mobile,
        }
    }
}

/// Distinguishes an absent field from an explicit `null`.
fn explicit_null<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AddressPatchBody {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub line1: Option<String>,
    /// `null` clears the second line
    #[serde(default, deserialize_with = "explicit_null")]
    #[schema(value_type = Option<String>)]
    pub line2: Option<Option<String>>,
    pub landmark: Option<String>,
    pub zip_code: Option<i32>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub mobile: Option<String>,
}

impl From<AddressPatchBody> for AddressPatch {
    fn from(b: AddressPatchBody) -> Self {
        Self {
            first_name: b.first_name,
            last_name: b.last_name,
            line1: b.line1,
            line2: b.line2,
            landmark: b.landmark,
            zip_code: b.zip_code,
            state: b.state,
            country: b.country,
            mobile: b.mobile,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddressResponse {
    pub id: Uuid,
    pub user: Uuid,
    #[serde(flatten)]
    pub fields: AddressBody,
    pub created_at: String,
}

impl From<Address> for AddressResponse {
    fn from(a: Address) -> Self {
        Self {
            id: a.id,
            user: a.user_id,
            fields: a.fields.into(),
            created_at: a.created_at.to_rfc3339(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/address/",
    params(("X-User-Id" = Uuid, Header, description = "Caller id")),
    responses(
        (status = 200, description = "Caller's addresses", body = [AddressResponse]),
        (status = 401, description = "Missing caller id"),
    ),
    tag = "addresses"
)]
pub async fn list_addresses(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let addresses = blocking(move || state.addresses.list(user.id)).await?;

    let body: Vec<AddressResponse> = addresses.into_iter().map(AddressResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    post,
    path = "/api/address/",
    request_body = AddressBody,
    params(("X-User-Id" = Uuid, Header, description = "Caller id")),
    responses(
        (status = 201, description = "Address created", body = AddressResponse),
        (status = 400, description = "Validation failed"),
    ),
    tag = "addresses"
)]
pub async fn create_address(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<AddressBody>,
) -> Result<HttpResponse, AppError> {
    let fields = AddressFields::from(body.into_inner());

    let address = blocking(move || state.addresses.create(user.id, fields)).await?;

    Ok(HttpResponse::Created().json(AddressResponse::from(address)))
}

#[utoipa::path(
    get,
    path = "/api/address/{id}/",
    params(
        ("id" = Uuid, Path, description = "Address id"),
        ("X-User-Id" = Uuid, Header, description = "Caller id"),
    ),
    responses(
        (status = 200, description = "Address found", body = AddressResponse),
        (status = 404, description = "No such address for this caller"),
    ),
    tag = "addresses"
)]
pub async fn get_address(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let address = blocking(move || state.addresses.get(user.id, id)).await?;
    Ok(HttpResponse::Ok().json(AddressResponse::from(address)))
}

#[utoipa::path(
    put,
    path = "/api/address/{id}/",
    request_body = AddressBody,
    params(
        ("id" = Uuid, Path, description = "Address id"),
        ("X-User-Id" = Uuid, Header, description = "Caller id"),
    ),
    responses(
        (status = 200, description = "Address replaced", body = AddressResponse),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "No such address for this caller"),
    ),
    tag = "addresses"
)]
pub async fn replace_address(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    body: web::Json<AddressBody>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let fields = AddressFields::from(body.into_inner());

    let address = blocking(move || state.addresses.replace(user.id, id, fields)).await?;

    Ok(HttpResponse::Ok().json(AddressResponse::from(address)))
}

#[utoipa::path(
    patch,
    path = "/api/address/{id}/",
    request_body = AddressPatchBody,
    params(
        ("id" = Uuid, Path, description = "Address id"),
        ("X-User-Id" = Uuid, Header, description = "Caller id"),
    ),
    responses(
        (status = 200, description = "Address updated", body = AddressResponse),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "No such address for this caller"),
    ),
    tag = "addresses"
)]
pub async fn patch_address(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    body: web::Json<AddressPatchBody>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let patch = AddressPatch::from(body.into_inner());

    let address = blocking(move || state.addresses.patch(user.id, id, patch)).await?;

    Ok(HttpResponse::Ok().json(AddressResponse::from(address)))
}

#[utoipa::path(
    delete,
    path = "/api/address/{id}/",
    params(
        ("id" = Uuid, Path, description = "Address id"),
        ("X-User-Id" = Uuid, Header, description = "Caller id"),
    ),
    responses(
        (status = 204, description = "Address deleted"),
        (status = 404, description = "No such address for this caller"),
    ),
    tag = "addresses"
)]
pub async fn delete_address(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    blocking(move || state.addresses.delete(user.id, id)).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{json, Value};
    use uuid::Uuid;

    use super::AddressPatchBody;
    use crate::handlers::test_support::{as_user, test_app};
    use crate::infrastructure::memory::MemoryStore;

    fn address_json() -> Value {
        json!({
            "first_name": "Asha",
            "last_name": "Rao",
            "line1": "12 MG Road",
            "line2": "Flat 4B",
            "landmark": "Near metro",
            "zip_code": 560001,
            "state": "Karnataka",
            "country": "India",
            "mobile": "9876543210"
        })
    }

    #[actix_web::test]
    async fn patch_body_tells_null_from_absent() {
        let absent: AddressPatchBody = serde_json::from_value(json!({ "state": "Goa" })).unwrap();
        assert_eq!(absent.line2, None);

        let cleared: AddressPatchBody = serde_json::from_value(json!({ "line2": null })).unwrap();
        assert_eq!(cleared.line2, Some(None));
    }

    #[actix_web::test]
    async fn crud_is_scoped_to_owner() {
        let app = test_app!(Arc::new(MemoryStore::default()));
        let owner = Uuid::new_v4();

        let req = as_user(test::TestRequest::post().uri("/api/address/"), owner)
            .set_json(address_json())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["user"], owner.to_string());
        assert_eq!(created["line2"], "Flat 4B");
        let uri = format!("/api/address/{}/", created["id"].as_str().unwrap_or_default());

        let req = as_user(test::TestRequest::get().uri(&uri), Uuid::new_v4()).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = as_user(test::TestRequest::patch().uri(&uri), owner)
            .set_json(json!({ "line2": null, "state": "Goa" }))
            .to_request();
        let patched: Value = test::call_and_read_body_json(&app, req).await;
        assert!(patched["line2"].is_null());
        assert_eq!(patched["state"], "Goa");
        assert_eq!(patched["first_name"], "Asha");

        let req = as_user(test::TestRequest::get().uri("/api/address"), owner).to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.as_array().map(Vec::len), Some(1));

        let req = as_user(test::TestRequest::delete().uri(&uri), owner).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = as_user(test::TestRequest::get().uri(&uri), owner).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn invalid_mobile_is_rejected() {
        let app = test_app!(Arc::new(MemoryStore::default()));
        let mut body = address_json();
        body["mobile"] = json!("98765-43210");

        let req = as_user(test::TestRequest::post().uri("/api/address/"), Uuid::new_v4())
            .set_json(body)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn put_replaces_every_field() {
        let app = test_app!(Arc::new(MemoryStore::default()));
        let owner = Uuid::new_v4();

        let req = as_user(test::TestRequest::post().uri("/api/address/"), owner)
            .set_json(address_json())
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let uri = format!("/api/address/{}/", created["id"].as_str().unwrap_or_default());

        let mut body = address_json();
        body["line1"] = json!("1 Residency Road");
        if let Some(obj) = body.as_object_mut() {
            obj.remove("line2");
        }
        let req = as_user(test::TestRequest::put().uri(&uri), owner)
            .set_json(body)
            .to_request();
        let replaced: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(replaced["line1"], "1 Residency Road");
        assert!(replaced["line2"].is_null());
    }
}
