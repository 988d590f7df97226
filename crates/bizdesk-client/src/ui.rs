//! The presentation seam.
//!
//! The controller never renders anything itself; it hands finished view
//! models to a [`Ui`]. A terminal, a GUI shell or a test double can sit
//! behind it.

use bizdesk_core::Module;

use crate::views::ModuleView;

/// Receiver for everything the user gets to see.
pub trait Ui {
    /// Unauthenticated state: ask for credentials.
    fn show_login(&mut self);

    /// Authenticated shell, labelled with the session role.
    fn show_main(&mut self, role: &str);

    /// Exactly one module is visible at a time; this replaces the previous one.
    fn show_module(&mut self, module: Module, view: ModuleView);

    /// A read-only detail text, e.g. a purchase summary.
    fn show_detail(&mut self, text: &str);

    /// A blocking, user-facing message. Called once per failed operation.
    fn notify(&mut self, message: &str);
}
