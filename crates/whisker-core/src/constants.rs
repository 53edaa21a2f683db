//! Constants shared across the detection pipeline.

/// Image extensions accepted for upload (compared case-insensitively).
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Longest storage key a file area accepts.
///
/// Keys are file names and are first written as `.{key}.part`, which must fit
/// in the 255-byte NAME_MAX of common filesystems.
pub const MAX_STORAGE_KEY_LENGTH: usize = 255 - ".".len() - ".part".len();

/// Side length of the square input the classifier expects.
pub const CLASSIFIER_INPUT_SIZE: u32 = 224;

/// Number of colour channels in the classifier input.
pub const CLASSIFIER_INPUT_CHANNELS: usize = 3;

/// Scores strictly above this value are cats; the threshold itself is not.
pub const CAT_THRESHOLD: f32 = 0.5;

/// Column of the model output holding the cat probability.
///
/// The two-class model orders its classes alphabetically (`cats`, `other`);
/// single-output sigmoid models expose the score at the same index.
pub const CAT_CLASS_INDEX: usize = 0;

/// Human-readable messages rendered with a detection result.
pub const MESSAGE_CAT_DETECTED: &str = "Cat detected!";
pub const MESSAGE_NO_CAT_DETECTED: &str = "No cat detected";

/// Owner notification template.
pub const NOTIFICATION_SUBJECT: &str = "🐱 Your cat has been detected!";
