/**
 * Get Current Student Handler
 *
 * GET /api/auth/me, behind the student guard. The guard has already
 * loaded the record, so this only reshapes it.
 */

use crate::backend::auth::handlers::types::StudentProfile;
use crate::backend::middleware::auth::CurrentStudent;
use crate::backend::response::ApiResponse;

pub async fn get_me(CurrentStudent(student): CurrentStudent) -> ApiResponse<StudentProfile> {
    ApiResponse::data(StudentProfile::from(student))
}
