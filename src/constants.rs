/// Role assigned to every newly registered account
pub const DEFAULT_ROLE: &str = "user";

/// Multipart field carrying the uploaded file
pub const UPLOAD_FIELD_NAME: &str = "profileImage";

/// Path prefix under which uploaded files are served
pub const UPLOADS_PATH: &str = "/uploads";

// =============================================================================
// Rabbit Messages
// =============================================================================

pub const MSG_RABBIT_ADDED: &str = "Rabbit added";
pub const MSG_RABBIT_UPDATED: &str = "Rabbit updated";
pub const MSG_RABBIT_DELETED: &str = "Rabbit deleted";

pub const ERR_RABBIT_NOT_FOUND: &str = "Rabbit not found";
pub const ERR_INVALID_RABBIT_ID: &str = "Invalid rabbit ID";
pub const ERR_FETCH_RABBITS: &str = "Failed to fetch rabbits";
pub const ERR_FETCH_RABBIT: &str = "Failed to fetch rabbit";
pub const ERR_ADD_RABBIT: &str = "Failed to add rabbit";
pub const ERR_UPDATE_RABBIT: &str = "Failed to update rabbit";
pub const ERR_DELETE_RABBIT: &str = "Failed to delete rabbit";

// =============================================================================
// User Messages
// =============================================================================

pub const MSG_PROFILE_IMAGE_UPDATED: &str = "Profile image updated";
pub const MSG_USER_DELETED: &str = "User deleted";

pub const ERR_USER_NOT_FOUND: &str = "User not found";
pub const ERR_INVALID_USER_ID: &str = "Invalid user ID";
pub const ERR_USERNAME_REQUIRED: &str = "Username is required";
pub const ERR_FETCH_USERS: &str = "Failed to fetch users";
pub const ERR_FETCH_USER: &str = "Failed to fetch user";
pub const ERR_UPDATE_USER: &str = "Failed to update user";
pub const ERR_UPDATE_PROFILE_IMAGE: &str = "Failed to update profile image";
pub const ERR_DELETE_USER: &str = "Failed to delete user";

// =============================================================================
// Registration / Login Messages
// =============================================================================

/// "Registration successful"
pub const MSG_REGISTERED: &str = "สมัครสมาชิกสำเร็จ";

/// "Login successful"
pub const MSG_LOGGED_IN: &str = "ล็อกอินสำเร็จ";

/// "Please fill in all fields"
pub const ERR_REGISTER_MISSING_FIELDS: &str = "กรุณากรอกข้อมูลให้ครบ";

/// "This username is already taken"
pub const ERR_USERNAME_TAKEN: &str = "ชื่อผู้ใช้นี้ถูกใช้แล้ว";

/// "Please enter username and password"
pub const ERR_LOGIN_MISSING_FIELDS: &str = "กรุณากรอกชื่อผู้ใช้และรหัสผ่าน";

/// "Invalid username or password"
pub const ERR_INVALID_CREDENTIALS: &str = "ชื่อผู้ใช้หรือรหัสผ่านไม่ถูกต้อง";

/// "A system error occurred"
pub const ERR_SYSTEM: &str = "เกิดข้อผิดพลาดในระบบ";

// =============================================================================
// Upload Messages
// =============================================================================

/// "No file was uploaded"
pub const ERR_NO_FILE: &str = "ไม่มีไฟล์ถูกอัปโหลด";

pub const ERR_UPLOAD_FAILED: &str = "Failed to store upload";
