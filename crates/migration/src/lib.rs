pub mod checksum;
pub mod discovery;
pub mod error;
pub mod model;
pub mod split;

pub use checksum::sha256_hex;
pub use discovery::{discover_migrations, load_migration_file};
pub use error::MigrationDiscoveryError;
pub use model::{MigrationFile, Statement};
pub use split::{split_statements, STATEMENT_BREAKPOINT};
