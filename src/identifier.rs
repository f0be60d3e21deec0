//! Identifier normalization and path helpers
//!
//! Every key in the flat store doubles as a hierarchical path. A trailing
//! `/` marks a folder; files carry no trailing slash. The root folder is
//! the empty string, and normalization collapses the legacy `"/"` spelling
//! onto it so prefix computations never see double or missing separators.

/// Normalize a folder name into its canonical prefix form.
///
/// Trims leading and trailing slashes, maps `""` and `"."` to the root
/// (empty string) and appends exactly one trailing `/` otherwise.
/// Idempotent: normalizing an already-normalized name is a no-op.
pub fn normalize_folder_name(folder_name: &str) -> String {
    let trimmed = folder_name.trim_matches('/');
    if trimmed.is_empty() || trimmed == "." {
        return String::new();
    }
    format!("{}/", trimmed)
}

/// Whether an identifier denotes a folder (ends with `/`)
pub fn is_folder(identifier: &str) -> bool {
    identifier.ends_with('/')
}

/// The identifier of the folder containing `identifier`.
///
/// Works for file and folder identifiers alike; returns the root (empty
/// string) for top-level entries.
pub fn parent_folder_name(identifier: &str) -> String {
    let trimmed = identifier.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(pos) => trimmed[..pos].to_string(),
        None => String::new(),
    }
}

/// The last path component of an identifier, without any trailing slash
pub fn base_name(identifier: &str) -> &str {
    let trimmed = identifier.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(pos) => &trimmed[pos + 1..],
        None => trimmed,
    }
}

/// Content-independent identifier hash: BLAKE3 of the key string, hex-encoded.
///
/// Two blobs with the same identifier always hash identically and content
/// changes never change the hash; downstream index logic relies on this.
pub fn hash_identifier(identifier: &str) -> String {
    hex::encode(blake3::hash(identifier.as_bytes()).as_bytes())
}

/// Number of `/` separators in an identifier, used for depth filtering
pub(crate) fn slash_count(identifier: &str) -> usize {
    identifier.matches('/').count()
}

/// Whether `folder` lies more than one level below `parent`.
///
/// A direct child folder marker carries exactly one slash more than its
/// parent prefix (its own trailing slash).
pub(crate) fn is_sub_sub_folder(folder: &str, parent: &str) -> bool {
    slash_count(folder) > slash_count(parent) + 1
}
