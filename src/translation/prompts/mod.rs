/*!
 * Prompt construction for page translation.
 *
 * This module provides one template per translation direction, selected
 * from the model profile.
 */

pub mod templates;

// Re-export main types
pub use templates::PromptTemplate;
