/*!
 * Authenticated user extractor
 *
 * Public API:
 * - AuthUser (also usable directly as a handler argument)
 */

mod core;
mod types;

pub use types::AuthUser;
