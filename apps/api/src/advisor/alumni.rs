use crate::models::alumni::AlumniRecord;

/// Alumni whose `job_title` equals `job_title` ignoring case, in roster order.
pub fn find_relevant_alumni<'a>(
    job_title: &str,
    alumni: &'a [AlumniRecord],
) -> Vec<&'a AlumniRecord> {
    let wanted = job_title.to_lowercase();
    alumni
        .iter()
        .filter(|a| a.job_title.to_lowercase() == wanted)
        .collect()
}
