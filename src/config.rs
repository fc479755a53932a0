// Fixed limits shared by the scanner, the tables and the driver

/// Longest line handed to the scanner; longer physical lines are split
pub const MAX_LINE_LEN: usize = 80;

/// Longest lexeme the scanner will build before flagging it as too long
pub const MAX_TOKEN_LEN: usize = 8;

/// Upper bound on the length of a token's diagnostic message
pub const MAX_MESSAGE_LEN: usize = 32;

/// Number of slots in both the reserved-word table and the symbol table
pub const HASH_TABLE_SIZE: usize = 30;

/// Length of the file name accepted at the interactive prompt (advisory)
pub const MAX_FILE_LEN: usize = 32;
