//! Behaviour tests for the fleet REST API over the in-memory adapters.
//!
//! These scenarios drive the real handlers, session middleware and domain
//! services end to end: CNPJ validation and uniqueness on the company
//! registry, the driver to company relationship, and the session lifecycle.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

mod support;

use actix_web::http::Method;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

use support::fleet_http::FleetWorld;

const MANAGER_EMAIL: &str = "manager@example.com";
const MANAGER_PASSWORD: &str = "correct-horse";

#[fixture]
fn world() -> FleetWorld {
    FleetWorld::new()
}

fn last_company_path(world: &FleetWorld) -> String {
    let id = world.last_company_id.borrow().clone().expect("a company was created");
    format!("/api/v1/companies/{id}")
}

fn last_driver_path(world: &FleetWorld) -> String {
    let id = world.last_driver_id.borrow().clone().expect("a driver was created");
    format!("/api/v1/drivers/{id}")
}

fn register_company(world: &FleetWorld, name: &str, tax_id: &str) -> u16 {
    let status = world.send(
        Method::POST,
        "/api/v1/companies",
        Some(json!({"name": name, "taxId": tax_id})),
    );
    if status == 201 {
        let id = world.with_last(|last| last.body["id"].as_str().map(str::to_owned));
        *world.last_company_id.borrow_mut() = id;
    }
    status
}

fn add_driver(world: &FleetWorld, name: &str, licence: &str, company_id: &str) -> u16 {
    let status = world.send(
        Method::POST,
        "/api/v1/drivers",
        Some(json!({"name": name, "licenseNumber": licence, "companyId": company_id})),
    );
    if status == 201 {
        let id = world.with_last(|last| last.body["id"].as_str().map(str::to_owned));
        *world.last_driver_id.borrow_mut() = id;
    }
    status
}

// -----------------------------------------------------------------------------
// Given
// -----------------------------------------------------------------------------

#[given("a signed-in fleet manager")]
fn a_signed_in_fleet_manager(world: &FleetWorld) {
    world.sign_in(MANAGER_EMAIL, MANAGER_PASSWORD);
}

#[given("an anonymous client")]
fn an_anonymous_client(world: &FleetWorld) {
    world.sign_out_locally();
}

#[given("a registered account \"{email}\" with password \"{password}\"")]
fn a_registered_account(world: &FleetWorld, email: String, password: String) {
    let status = world.send(
        Method::POST,
        "/api/v1/users",
        Some(json!({"email": email, "name": "Fleet Manager", "password": password})),
    );
    assert_eq!(status, 201);
}

#[given("company \"{name}\" is registered with tax id \"{tax_id}\"")]
fn company_is_registered(world: &FleetWorld, name: String, tax_id: String) {
    assert_eq!(register_company(world, &name, &tax_id), 201);
}

#[given("driver \"{name}\" with licence \"{licence}\" works for the last company")]
fn driver_works_for_the_last_company(world: &FleetWorld, name: String, licence: String) {
    let company_id = world.last_company_id.borrow().clone().expect("a company");
    assert_eq!(add_driver(world, &name, &licence, &company_id), 201);
}

// -----------------------------------------------------------------------------
// When
// -----------------------------------------------------------------------------

#[when("the manager registers company \"{name}\" with tax id \"{tax_id}\"")]
fn the_manager_registers_company(world: &FleetWorld, name: String, tax_id: String) {
    register_company(world, &name, &tax_id);
}

#[when("the manager renames the last company to \"{name}\"")]
fn the_manager_renames_the_last_company(world: &FleetWorld, name: String) {
    let path = last_company_path(world);
    world.send(Method::PATCH, &path, Some(json!({"name": name})));
}

#[when("the client lists companies")]
fn the_client_lists_companies(world: &FleetWorld) {
    world.send(Method::GET, "/api/v1/companies", None);
}

#[when("the manager adds driver \"{name}\" with licence \"{licence}\" to the last company")]
fn the_manager_adds_driver_to_the_last_company(world: &FleetWorld, name: String, licence: String) {
    let company_id = world.last_company_id.borrow().clone().expect("a company");
    add_driver(world, &name, &licence, &company_id);
}

#[when("the manager adds driver \"{name}\" with licence \"{licence}\" to company \"{company}\"")]
fn the_manager_adds_driver_to_company(
    world: &FleetWorld,
    name: String,
    licence: String,
    company: String,
) {
    add_driver(world, &name, &licence, &company);
}

#[when("the manager deletes the last company")]
fn the_manager_deletes_the_last_company(world: &FleetWorld) {
    let path = last_company_path(world);
    world.send(Method::DELETE, &path, None);
}

#[when("the manager deletes the last driver")]
fn the_manager_deletes_the_last_driver(world: &FleetWorld) {
    let path = last_driver_path(world);
    let status = world.send(Method::DELETE, &path, None);
    assert_eq!(status, 204);
}

#[when("the client requests the current profile")]
fn the_client_requests_the_current_profile(world: &FleetWorld) {
    world.send(Method::GET, "/api/v1/users/me", None);
}

#[when("the client signs in as \"{email}\" with password \"{password}\"")]
fn the_client_signs_in(world: &FleetWorld, email: String, password: String) {
    world.send(
        Method::POST,
        "/api/v1/login",
        Some(json!({"email": email, "password": password})),
    );
}

#[when("the client logs out")]
fn the_client_logs_out(world: &FleetWorld) {
    let status = world.send(Method::POST, "/api/v1/logout", None);
    assert_eq!(status, 204);
}

// -----------------------------------------------------------------------------
// Then
// -----------------------------------------------------------------------------

#[then("the response status is {status}")]
fn the_response_status_is(world: &FleetWorld, status: u16) {
    world.with_last(|last| assert_eq!(last.status, status, "body: {}", last.body));
}

#[then("the company tax id is stored as \"{tax_id}\"")]
fn the_company_tax_id_is_stored_as(world: &FleetWorld, tax_id: String) {
    world.with_last(|last| assert_eq!(last.body["taxId"], Value::String(tax_id)));
}

#[then("the company tax id is formatted as \"{formatted}\"")]
fn the_company_tax_id_is_formatted_as(world: &FleetWorld, formatted: String) {
    world.with_last(|last| assert_eq!(last.body["formattedTaxId"], Value::String(formatted)));
}

#[then("the error reports field \"{field}\" with code \"{code}\"")]
fn the_error_reports_field(world: &FleetWorld, field: String, code: String) {
    world.with_last(|last| {
        let details = &last.body["details"];
        assert_eq!(details["code"], Value::String(code));
        assert!(
            details["fields"].get(&field).is_some(),
            "missing field {field} in {details}"
        );
    });
}

#[then("the error detail code is \"{code}\"")]
fn the_error_detail_code_is(world: &FleetWorld, code: String) {
    world.with_last(|last| assert_eq!(last.body["details"]["code"], Value::String(code)));
}

#[then("the error body echoes the trace id")]
fn the_error_body_echoes_the_trace_id(world: &FleetWorld) {
    world.with_last(|last| {
        let trace_id = last.trace_id.as_deref().expect("trace id header");
        assert_eq!(last.body["traceId"].as_str(), Some(trace_id));
    });
}

#[then("the driver works for the last company")]
fn the_driver_works_for_the_last_company(world: &FleetWorld) {
    let company_id = world.last_company_id.borrow().clone().expect("a company");
    world.with_last(|last| assert_eq!(last.body["companyId"], Value::String(company_id)));
}

#[then("the profile email is \"{email}\"")]
fn the_profile_email_is(world: &FleetWorld, email: String) {
    world.with_last(|last| {
        assert_eq!(last.body["email"], Value::String(email));
        assert!(last.body.get("password").is_none());
        assert!(last.body.get("passwordHash").is_none());
    });
}

// -----------------------------------------------------------------------------
// Scenarios
// -----------------------------------------------------------------------------

#[scenario(
    path = "tests/features/company_registry.feature",
    name = "Registering a company with a punctuated CNPJ"
)]
fn registering_a_company_with_a_punctuated_cnpj(world: FleetWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/company_registry.feature",
    name = "Rejecting a CNPJ with corrupted check digits"
)]
fn rejecting_a_cnpj_with_corrupted_check_digits(world: FleetWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/company_registry.feature",
    name = "Rejecting a CNPJ of the wrong length"
)]
fn rejecting_a_cnpj_of_the_wrong_length(world: FleetWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/company_registry.feature",
    name = "Rejecting the same CNPJ written differently"
)]
fn rejecting_the_same_cnpj_written_differently(world: FleetWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/company_registry.feature",
    name = "Renaming a company keeps its tax id"
)]
fn renaming_a_company_keeps_its_tax_id(world: FleetWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/company_registry.feature",
    name = "Anonymous clients cannot list companies"
)]
fn anonymous_clients_cannot_list_companies(world: FleetWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/driver_roster.feature",
    name = "Adding a driver to a company"
)]
fn adding_a_driver_to_a_company(world: FleetWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/driver_roster.feature",
    name = "Rejecting a driver for an unknown company"
)]
fn rejecting_a_driver_for_an_unknown_company(world: FleetWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/driver_roster.feature",
    name = "Protecting a company that still employs drivers"
)]
fn protecting_a_company_that_still_employs_drivers(world: FleetWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/driver_roster.feature",
    name = "Removing the last driver frees the company"
)]
fn removing_the_last_driver_frees_the_company(world: FleetWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/account_session.feature",
    name = "A registered user reads their own profile"
)]
fn a_registered_user_reads_their_own_profile(world: FleetWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/account_session.feature",
    name = "A wrong password is unauthorised"
)]
fn a_wrong_password_is_unauthorised(world: FleetWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/account_session.feature",
    name = "Logging out ends the session"
)]
fn logging_out_ends_the_session(world: FleetWorld) {
    drop(world);
}
