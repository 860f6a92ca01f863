//! Client tests against a live server on an ephemeral port.

mod common;

use rust_decimal::Decimal;
use tempfile::TempDir;

use common::spawn_server;
use rabbit_storefront::client::{
    change_profile_image, ApiClient, AuthSession, ClientError, FileSessionStore, NavBar,
    ProfileError, ProfileForm, Route, SelectedImage,
};
use rabbit_storefront::constants::{
    ERR_INVALID_CREDENTIALS, ERR_RABBIT_NOT_FOUND, ERR_USERNAME_TAKEN, MSG_LOGGED_IN,
    MSG_REGISTERED,
};
use rabbit_storefront::models::{RabbitInput, RegisterRequest};
use rabbit_storefront::store::UserStore;

fn registration(username: &str) -> RegisterRequest {
    RegisterRequest {
        username: Some(username.to_string()),
        password: Some("secret".to_string()),
        email: Some(format!("{}@example.com", username)),
    }
}

async fn logged_in(api: &ApiClient, username: &str) -> AuthSession {
    api.register(&registration(username)).await.unwrap();
    let response = api.login(username, "secret").await.unwrap();
    let mut session = AuthSession::new();
    session.login(response.user);
    session
}

#[tokio::test]
async fn test_register_login_and_persist_session() {
    let temp_dir = TempDir::new().unwrap();
    let (base_url, _) = spawn_server(&temp_dir.path().join("uploads")).await;
    let api = ApiClient::new(base_url);

    let registered = api.register(&registration("tae")).await.unwrap();
    assert_eq!(registered.message, MSG_REGISTERED);

    let response = api.login("tae", "secret").await.unwrap();
    assert_eq!(response.message, MSG_LOGGED_IN);

    let store = FileSessionStore::new(temp_dir.path().join("session.json"));
    let mut session = AuthSession::load(&store).unwrap();
    session.login(response.user);
    session.save(&store).unwrap();

    let restored = AuthSession::load(&store).unwrap();
    let user = restored.user().unwrap();
    assert_eq!(user.username, "tae");
    assert_eq!(user.email, "tae@example.com");

    let nav = NavBar::new(&restored);
    assert_eq!(nav.greeting.as_deref(), Some("tae"));
    assert_eq!(Route::Profile.resolve(&restored), Route::Profile);
}

#[tokio::test]
async fn test_failed_login_surfaces_server_message() {
    let temp_dir = TempDir::new().unwrap();
    let (base_url, _) = spawn_server(temp_dir.path()).await;
    let api = ApiClient::new(base_url);
    api.register(&registration("tae")).await.unwrap();

    let err = api.login("tae", "wrong").await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), ERR_INVALID_CREDENTIALS);
}

#[tokio::test]
async fn test_duplicate_registration_surfaces_server_message() {
    let temp_dir = TempDir::new().unwrap();
    let (base_url, _) = spawn_server(temp_dir.path()).await;
    let api = ApiClient::new(base_url);
    api.register(&registration("tae")).await.unwrap();

    let err = api.register(&registration("tae")).await.unwrap_err();

    assert!(matches!(err, ClientError::Api { status: 400, .. }));
    assert_eq!(err.to_string(), ERR_USERNAME_TAKEN);
}

#[tokio::test]
async fn test_profile_load_and_save() {
    let temp_dir = TempDir::new().unwrap();
    let (base_url, store) = spawn_server(temp_dir.path()).await;
    let api = ApiClient::new(base_url);
    let mut session = logged_in(&api, "tae").await;

    let mut form = ProfileForm::load(&api, &mut session).await.unwrap();
    assert_eq!(form.email, "tae@example.com");
    assert_eq!(form.phone, "");

    form.phone = "0812345678".to_string();
    form.address = "Bangkok".to_string();
    form.gender = "female".to_string();
    let user = form.save(&api, &mut session, None).await.unwrap();

    assert_eq!(user.phone, "0812345678");
    assert_eq!(user.gender, "female");
    assert!(session.is_dirty());

    let stored = store.find_user_by_username("tae").await.unwrap().unwrap();
    assert_eq!(stored.address.as_deref(), Some("Bangkok"));
    assert_eq!(stored.gender.as_deref(), Some("female"));
    assert_eq!(stored.profile_image, None);
}

#[tokio::test]
async fn test_profile_save_rejects_short_phone_without_request() {
    let temp_dir = TempDir::new().unwrap();
    let (base_url, store) = spawn_server(temp_dir.path()).await;
    let api = ApiClient::new(base_url);
    let mut session = logged_in(&api, "tae").await;

    let mut form = ProfileForm::load(&api, &mut session).await.unwrap();
    form.phone = "12345".to_string();
    let result = form.save(&api, &mut session, None).await;

    assert!(matches!(result, Err(ProfileError::InvalidPhone)));
    let stored = store.find_user_by_username("tae").await.unwrap().unwrap();
    assert_eq!(stored.phone, None);
}

#[tokio::test]
async fn test_change_profile_image_uploads_and_updates_account() {
    let temp_dir = TempDir::new().unwrap();
    let (base_url, store) = spawn_server(temp_dir.path()).await;
    let api = ApiClient::new(base_url.clone());
    let mut session = logged_in(&api, "tae").await;
    let bytes = b"\x89PNG\r\n\x1a\nnot really a png".to_vec();

    let user = change_profile_image(
        &api,
        &mut session,
        SelectedImage {
            file_name: "avatar.png".to_string(),
            bytes: bytes.clone(),
        },
    )
    .await
    .unwrap();

    // The session copy carries a cache-busting suffix; the stored URL does not
    let (url, stamp) = user.profile_image.split_once("?t=").unwrap();
    assert!(url.starts_with(&format!("{}/uploads/", base_url)));
    assert!(stamp.parse::<i64>().is_ok());

    let stored = store.find_user_by_username("tae").await.unwrap().unwrap();
    assert_eq!(stored.profile_image.as_deref(), Some(url));

    assert_eq!(api.download(&user.profile_image).await.unwrap(), bytes);

    // A later profile save sends the URL back without the suffix
    let form = ProfileForm::from_user(&user);
    form.save(&api, &mut session, None).await.unwrap();
    let stored = store.find_user_by_username("tae").await.unwrap().unwrap();
    assert_eq!(stored.profile_image.as_deref(), Some(url));
}

#[tokio::test]
async fn test_change_profile_image_requires_login() {
    let temp_dir = TempDir::new().unwrap();
    let (base_url, _) = spawn_server(temp_dir.path()).await;
    let api = ApiClient::new(base_url);
    let mut session = AuthSession::new();

    let result = change_profile_image(
        &api,
        &mut session,
        SelectedImage {
            file_name: "avatar.png".to_string(),
            bytes: vec![1, 2, 3],
        },
    )
    .await;

    assert!(matches!(result, Err(ProfileError::NotLoggedIn)));
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_profile_save_with_image_for_unknown_account_keeps_upload() {
    let temp_dir = TempDir::new().unwrap();
    let (base_url, _) = spawn_server(temp_dir.path()).await;
    let api = ApiClient::new(base_url);
    let mut session = AuthSession::new();
    // The mock Google account has no row on the server
    session.login_with_google();
    let before = session.clone();

    let form = ProfileForm::from_user(session.user().unwrap());
    let result = form
        .save(
            &api,
            &mut session,
            Some(SelectedImage {
                file_name: "avatar.png".to_string(),
                bytes: vec![7; 16],
            }),
        )
        .await;

    assert!(matches!(
        result,
        Err(ProfileError::Client(ClientError::Api { status: 404, .. }))
    ));
    assert_eq!(session, before);
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_rabbit_crud_through_client() {
    let temp_dir = TempDir::new().unwrap();
    let (base_url, _) = spawn_server(temp_dir.path()).await;
    let api = ApiClient::new(base_url);

    let input = RabbitInput {
        seller_id: Some(1),
        name: "TAE".to_string(),
        breed: Some("Netherland Dwarf".to_string()),
        age: Some(1),
        gender: Some("male".to_string()),
        price: Decimal::new(9950, 2),
        description: None,
        image_url: None,
        status: "available".to_string(),
    };

    let created = api.create_rabbit(&input).await.unwrap().rabbit;
    assert_eq!(created.name, "TAE");
    assert_eq!(created.price, Decimal::new(9950, 2));

    let fetched = api.get_rabbit(created.rabbit_id).await.unwrap();
    assert_eq!(fetched, created);

    let updated = api
        .update_rabbit(
            created.rabbit_id,
            &RabbitInput {
                status: "sold".to_string(),
                ..input.clone()
            },
        )
        .await
        .unwrap()
        .rabbit;
    assert_eq!(updated.status, "sold");
    assert_eq!(api.list_rabbits().await.unwrap(), vec![updated]);

    api.delete_rabbit(created.rabbit_id).await.unwrap();
    let err = api.get_rabbit(created.rabbit_id).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), ERR_RABBIT_NOT_FOUND);
}
