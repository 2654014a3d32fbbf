mod archive;
mod index;
mod record;
mod source;
mod version;

pub use archive::ArchiveKind;
pub use index::{parse_index_str, render_index_str, IndexError, INDEX_FILE};
pub use record::PackageRecord;
pub use source::PackageSource;
pub use version::{InvalidVersion, PackageVersion};
