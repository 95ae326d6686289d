//! Shared constants for Riddler components.

/// Smallest number of puzzles a single request may ask for
pub const MIN_PUZZLE_COUNT: u32 = 1;

/// Largest number of puzzles a single request may ask for
pub const MAX_PUZZLE_COUNT: u32 = 100;

/// Largest number of puzzles requested from a model provider in one call
pub const MAX_AI_PUZZLE_COUNT: u32 = 20;

/// Default puzzle count for the command-line generator
pub const DEFAULT_CLI_COUNT: u32 = 3;

/// Default puzzle count shown in the web UI
pub const DEFAULT_UI_COUNT: u32 = 5;

/// Largest puzzle count offered by the web UI controls
pub const MAX_UI_COUNT: u32 = 50;

/// Default web server listen address
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8501";

/// Wrapper keys a model may use around the puzzle list, checked in order
pub const RESPONSE_WRAPPER_KEYS: [&str; 4] = ["items", "puzzles", "data", "result"];

/// Environment variable names
pub mod env_vars {
    /// Provider selector: "openai", "gemini", anything else means none
    pub const MODEL_PROVIDER: &str = "MODEL_PROVIDER";

    /// OpenAI credential
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

    /// Gemini credential
    pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
}

/// Returned by single-puzzle selection when no template matches
pub mod fallback_puzzle {
    pub const QUESTION: &str = "What has a head and a tail but no body?";
    pub const ANSWER: &str = "A coin";
}
