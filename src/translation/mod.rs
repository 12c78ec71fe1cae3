/*!
 * Page translation through a local inference endpoint.
 *
 * - `prompts`: Prompt templates keyed by translation direction
 * - `client`: The per-page translation client
 */

// Re-export main types for easier usage
pub use self::client::TranslationClient;
pub use self::prompts::PromptTemplate;

// Submodules
pub mod client;
pub mod prompts;
