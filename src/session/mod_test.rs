use super::*;
use crate::store::{MemoryStore, StoreError, StoredValue};

const CUSTOMER_APP: &str = "com.example.fooddeliveryapp";
const RIDER_APP: &str = "com.example.fooddeliveryapp.rider";
const RESTAURANT_APP: &str = "com.example.fooddeliveryapp.restaurant";

fn session_over(store: &Arc<MemoryStore>, app_id: &str) -> SessionManager {
    SessionManager::new(store.clone(), app_id)
}

fn fresh_session() -> (Arc<MemoryStore>, SessionManager) {
    let store = Arc::new(MemoryStore::new());
    let session = session_over(&store, CUSTOMER_APP);
    (store, session)
}

fn user_with_role(role: &str) -> UserData {
    UserData {
        id: "u1".into(),
        name: "Alice".into(),
        email: "alice@example.com".into(),
        role: role.into(),
        restaurant_id: None,
        profile_image_url: Some("https://img/alice.png".into()),
        phone_number: None,
        email_verified: true,
    }
}

/// Store whose writes always fail; reads see nothing.
struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Option<StoredValue> {
        None
    }

    fn apply(&self, _edit: Edit) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("disk full")))
    }
}

// =============================================================================
// store_token
// =============================================================================

#[test]
fn new_session_is_logged_out() {
    let (_store, session) = fresh_session();
    assert!(!session.is_logged_in());
    assert_eq!(session.token(), None);
    assert_eq!(session.login_timestamp(), None);
}

#[test]
fn store_token_logs_in_immediately() {
    let (_store, session) = fresh_session();
    session.store_token("abc123").unwrap();
    assert!(session.is_logged_in());
    assert_eq!(session.token().as_deref(), Some("abc123"));
}

#[test]
fn store_token_records_login_timestamp() {
    let (store, session) = fresh_session();
    session.store_token("abc123").unwrap();
    let ts = session.login_timestamp().unwrap();
    assert!(ts > 1_600_000_000_000, "timestamp should be epoch millis, got {ts}");
    assert_eq!(store.get_bool(KEY_IS_LOGGED), Some(true));
}

#[test]
fn store_blank_token_is_rejected_without_mutation() {
    let (store, session) = fresh_session();
    for blank in ["", "   ", "\t\n"] {
        let err = session.store_token(blank).unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }
    assert!(!session.is_logged_in());
    assert!(store.is_empty());
}

#[test]
fn store_blank_token_keeps_existing_login() {
    let (_store, session) = fresh_session();
    session.store_token("abc123").unwrap();
    assert!(session.store_token(" ").is_err());
    assert!(session.is_logged_in());
    assert_eq!(session.token().as_deref(), Some("abc123"));
}

#[tokio::test]
async fn store_token_notifies_subscribers() {
    let (_store, session) = fresh_session();
    let mut rx = session.subscribe_logged_in();
    assert!(!*rx.borrow_and_update());

    session.store_token("abc123").unwrap();
    rx.changed().await.unwrap();
    assert!(*rx.borrow());
}

// =============================================================================
// store_user_data / user_role
// =============================================================================

#[test]
fn owner_role_maps_to_restaurant_owner() {
    let (_store, session) = fresh_session();
    session.store_user_data(&user_with_role("owner"));
    assert_eq!(session.user_role(), UserRole::RestaurantOwner);
    assert_eq!(session.current_role(), UserRole::RestaurantOwner);
}

#[test]
fn rider_role_maps_to_rider() {
    let (_store, session) = fresh_session();
    session.store_user_data(&user_with_role("rider"));
    assert_eq!(session.user_role(), UserRole::Rider);
}

#[test]
fn role_mapping_is_case_insensitive() {
    let (_store, session) = fresh_session();
    session.store_user_data(&user_with_role("OWNER"));
    assert_eq!(session.user_role(), UserRole::RestaurantOwner);
}

#[test]
fn other_roles_map_to_customer() {
    let store = Arc::new(MemoryStore::new());
    let session = session_over(&store, RIDER_APP);
    for role in ["customer", "admin", ""] {
        session.store_user_data(&user_with_role(role));
        assert_eq!(session.user_role(), UserRole::Customer, "role {role:?}");
    }
}

#[test]
fn user_data_round_trips() {
    let (_store, session) = fresh_session();
    let user = UserData {
        restaurant_id: Some("rest-7".into()),
        phone_number: Some("+44 20 7946 0000".into()),
        ..user_with_role("owner")
    };
    session.store_user_data(&user);
    assert_eq!(session.user_data(), Some(user));
}

#[test]
fn user_data_restaurant_id_stored_separately() {
    let (_store, session) = fresh_session();
    let user = UserData { restaurant_id: Some("rest-7".into()), ..user_with_role("owner") };
    session.store_user_data(&user);
    assert_eq!(session.restaurant_id().as_deref(), Some("rest-7"));
}

#[test]
fn user_data_without_restaurant_drops_previous_id() {
    let (_store, session) = fresh_session();
    session.store_user_data(&UserData { restaurant_id: Some("r9".into()), ..user_with_role("owner") });

    let rider = UserData { id: "u2".into(), name: "Bob".into(), ..user_with_role("rider") };
    session.store_user_data(&rider);
    assert_eq!(session.restaurant_id(), None);

    session.store_user_data(&UserData { restaurant_id: Some(String::new()), ..rider });
    assert_eq!(session.restaurant_id(), None);
}

#[test]
fn blank_restaurant_id_is_not_stored() {
    let (_store, session) = fresh_session();
    session.store_restaurant_id("r1");
    session.store_restaurant_id("");
    session.store_restaurant_id("   ");
    assert_eq!(session.restaurant_id().as_deref(), Some("r1"));
}

#[test]
fn corrupt_user_data_reads_as_absent() {
    let (store, session) = fresh_session();
    store.apply(Edit::new().put_string(KEY_USER_DATA, "{oops")).unwrap();
    assert_eq!(session.user_data(), None);
}

#[test]
fn role_defaults_from_app_id_when_unset() {
    let store = Arc::new(MemoryStore::new());
    assert_eq!(session_over(&store, CUSTOMER_APP).user_role(), UserRole::Customer);
    assert_eq!(session_over(&store, RIDER_APP).user_role(), UserRole::Rider);
    assert_eq!(session_over(&store, RESTAURANT_APP).user_role(), UserRole::RestaurantOwner);
}

#[test]
fn unrecognized_stored_role_falls_back_to_customer() {
    let store = Arc::new(MemoryStore::new());
    store.apply(Edit::new().put_string(KEY_USER_TYPE, "ADMIN")).unwrap();
    let session = session_over(&store, RIDER_APP);
    assert_eq!(session.user_role(), UserRole::Customer);
    assert_eq!(session.current_role(), UserRole::Customer);
}

#[test]
fn explicit_role_overrides_channel_default() {
    let store = Arc::new(MemoryStore::new());
    let session = session_over(&store, RIDER_APP);
    session.store_user_role(UserRole::RestaurantOwner);
    assert_eq!(session.user_role(), UserRole::RestaurantOwner);
    assert_eq!(store.get_string(KEY_USER_TYPE).as_deref(), Some("RESTAURANT"));
}

#[test]
fn explicit_role_drops_previous_profile() {
    let (_store, session) = fresh_session();
    session.store_token("tokA").unwrap();
    session.store_user_data(&UserData { restaurant_id: Some("r9".into()), ..user_with_role("owner") });

    session.store_token("tokB").unwrap();
    session.store_user_role(UserRole::Rider);

    assert_eq!(session.token().as_deref(), Some("tokB"));
    assert_eq!(session.current_role(), UserRole::Rider);
    assert_eq!(session.user_data(), None);
    assert_eq!(session.restaurant_id(), None);
}

// =============================================================================
// clear_session
// =============================================================================

#[test]
fn clear_session_erases_everything() {
    let (store, session) = fresh_session();
    session.store_token("abc123").unwrap();
    session.store_user_data(&user_with_role("rider"));
    session.store_restaurant_id("r1");

    session.clear_session();

    assert_eq!(session.token(), None);
    assert_eq!(session.user_data(), None);
    assert_eq!(session.restaurant_id(), None);
    assert!(!session.is_logged_in());
    assert!(store.is_empty());
}

#[test]
fn clear_session_resets_role_to_channel_default() {
    let store = Arc::new(MemoryStore::new());
    let session = session_over(&store, RIDER_APP);
    session.store_user_data(&user_with_role("owner"));
    assert_eq!(session.current_role(), UserRole::RestaurantOwner);

    session.clear_session();
    assert_eq!(session.current_role(), UserRole::Rider);
    assert_eq!(session.user_role(), UserRole::Rider);
}

// =============================================================================
// restore from store
// =============================================================================

#[test]
fn session_restores_from_persisted_state() {
    let store = Arc::new(MemoryStore::new());
    {
        let session = session_over(&store, CUSTOMER_APP);
        session.store_token("abc123").unwrap();
        session.store_user_data(&user_with_role("rider"));
    }

    let restored = session_over(&store, CUSTOMER_APP);
    assert!(restored.is_logged_in());
    assert_eq!(restored.current_role(), UserRole::Rider);
}

#[test]
fn token_without_logged_flag_is_not_logged_in() {
    let store = Arc::new(MemoryStore::new());
    store.apply(Edit::new().put_string(KEY_AUTH_TOKEN, "abc123")).unwrap();
    let session = session_over(&store, CUSTOMER_APP);
    assert!(!session.is_logged_in());
}

#[test]
fn logged_flag_with_empty_token_is_not_logged_in() {
    let store = Arc::new(MemoryStore::new());
    store
        .apply(Edit::new().put_string(KEY_AUTH_TOKEN, "").put_bool(KEY_IS_LOGGED, true))
        .unwrap();
    let session = session_over(&store, CUSTOMER_APP);
    assert!(!session.is_logged_in());
}

#[test]
fn observable_is_not_refreshed_by_external_writes() {
    let (store, session) = fresh_session();
    store
        .apply(Edit::new().put_string(KEY_AUTH_TOKEN, "sneaky").put_bool(KEY_IS_LOGGED, true))
        .unwrap();
    assert!(!session.is_logged_in());
}

// =============================================================================
// store failures
// =============================================================================

#[test]
fn write_failures_still_update_observables() {
    let session = SessionManager::new(Arc::new(FailingStore), CUSTOMER_APP);
    session.store_token("abc123").unwrap();
    assert!(session.is_logged_in());

    session.store_user_data(&user_with_role("rider"));
    assert_eq!(session.current_role(), UserRole::Rider);

    session.clear_session();
    assert!(!session.is_logged_in());
}
