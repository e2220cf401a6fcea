// src/domain/access.rs
//
// Role-gated view composition.
//
// A static table from the current role to the reachable screens and the
// operations they may trigger. No history is involved, only the role held
// by the current session (or its absence).

use serde::{Deserialize, Serialize};

use super::user::Role;

/// Screens of the mobile client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    Login,
    SignUp,
    Home,
    AnimalList,
    AnimalDetails,
    AddReport,
    RequestAdoption,
    AdoptionRequests,
}

/// Operations a screen can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ListAnimals,
    ViewAnimal,
    CreateAnimal,
    EditAnimal,
    DeleteAnimal,
    SubmitRequest,
    ViewOwnRequests,
    ViewAllRequests,
    RespondToRequest,
    WithdrawOwnRequest,
    WithdrawAnyRequest,
}

const ANONYMOUS_SCREENS: &[Screen] = &[Screen::Login, Screen::SignUp];

const USER_SCREENS: &[Screen] = &[
    Screen::Home,
    Screen::AnimalList,
    Screen::AnimalDetails,
    Screen::RequestAdoption,
    Screen::AdoptionRequests,
];

const ADMIN_SCREENS: &[Screen] = &[
    Screen::Home,
    Screen::AnimalList,
    Screen::AnimalDetails,
    Screen::AddReport,
    Screen::AdoptionRequests,
];

const USER_OPERATIONS: &[Operation] = &[
    Operation::ListAnimals,
    Operation::ViewAnimal,
    Operation::SubmitRequest,
    Operation::ViewOwnRequests,
    Operation::WithdrawOwnRequest,
];

const ADMIN_OPERATIONS: &[Operation] = &[
    Operation::ListAnimals,
    Operation::ViewAnimal,
    Operation::CreateAnimal,
    Operation::EditAnimal,
    Operation::DeleteAnimal,
    Operation::ViewAllRequests,
    Operation::RespondToRequest,
    Operation::WithdrawOwnRequest,
    Operation::WithdrawAnyRequest,
];

/// Screens reachable for the given role; `None` means signed out
pub fn screens_for(role: Option<Role>) -> &'static [Screen] {
    match role {
        None => ANONYMOUS_SCREENS,
        Some(Role::User) => USER_SCREENS,
        Some(Role::Admin) => ADMIN_SCREENS,
    }
}

/// Operations permitted for the given role; signed out permits none
pub fn operations_for(role: Option<Role>) -> &'static [Operation] {
    match role {
        None => &[],
        Some(Role::User) => USER_OPERATIONS,
        Some(Role::Admin) => ADMIN_OPERATIONS,
    }
}

pub fn permits(role: Option<Role>, operation: Operation) -> bool {
    operations_for(role).contains(&operation)
}

pub fn can_reach(role: Option<Role>, screen: Screen) -> bool {
    screens_for(role).contains(&screen)
}

/// First screen of the navigation stack
pub fn initial_screen(role: Option<Role>) -> Screen {
    match role {
        None => Screen::Login,
        Some(_) => Screen::Home,
    }
}

/// The screen that exposes an operation
pub fn screen_for(operation: Operation) -> Screen {
    match operation {
        Operation::ListAnimals => Screen::AnimalList,
        Operation::ViewAnimal => Screen::AnimalDetails,
        Operation::CreateAnimal | Operation::EditAnimal => Screen::AddReport,
        Operation::DeleteAnimal => Screen::AnimalList,
        Operation::SubmitRequest => Screen::RequestAdoption,
        Operation::ViewOwnRequests
        | Operation::ViewAllRequests
        | Operation::RespondToRequest
        | Operation::WithdrawOwnRequest
        | Operation::WithdrawAnyRequest => Screen::AdoptionRequests,
    }
}
