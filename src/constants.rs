pub mod matching {

    /// Minimum similarity ratio (0-100) a fuzzy title candidate must reach.
    pub const DEFAULT_SIMILARITY_THRESHOLD: u8 = 40;

    pub const MAX_SIMILARITY: u8 = 100;
}

pub mod fields {

    /// Wildcard field name that expands to every attribute except the title.
    pub const WILDCARD: &str = "all";

    /// Fields printed even when the caller does not ask for them.
    pub const DEFAULT_FIELDS: &[&str] = &["episodes"];
}

pub mod bot {

    pub const DEFAULT_COMMAND_PREFIX: &str = "!";

    pub const GET_ANIME: &str = "get_anime";

    pub const HOW_TO_USE: &str = "how_to_use";

    pub const PRINT_HELLO: &str = "print_hello";
}
