//! Outcome comment composition.
//!
//! The comment is a templated success/failure phrase, a link to the
//! published build results, and optionally a fenced block with the tail of
//! the build log. Historically the excerpt existed as a separate code path;
//! here it is a single composition with the excerpt conditional on
//! configuration and outcome.

/// Composes the outcome comment body.
///
/// `excerpt`, when present, is appended as a fenced code block in original
/// line order. Callers decide whether an excerpt applies (non-success
/// outcome, positive configured line count, log fetch succeeded).
pub fn compose_outcome_comment(
    template: &str,
    published_url: &str,
    run_path: &str,
    excerpt: Option<&[String]>,
) -> String {
    let mut body = format!(
        "{}\nRefer to this link for build results: {}{}",
        template, published_url, run_path
    );

    if let Some(lines) = excerpt {
        body.push_str("\n```\n");
        body.push_str(&lines.join("\n"));
        body.push_str("\n```");
    }

    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_begins_with_template_and_results_link() {
        let body = compose_outcome_comment(
            "All good",
            "https://ci.example.com/",
            "job/widget/42/",
            None,
        );
        assert_eq!(
            body,
            "All good\nRefer to this link for build results: https://ci.example.com/job/widget/42/"
        );
    }

    #[test]
    fn excerpt_is_fenced_in_original_order() {
        let lines = vec!["first".to_string(), "second".to_string()];
        let body = compose_outcome_comment(
            "Test FAILed.",
            "https://ci.example.com/",
            "job/widget/43/",
            Some(&lines),
        );
        assert!(body.starts_with(
            "Test FAILed.\nRefer to this link for build results: https://ci.example.com/job/widget/43/"
        ));
        assert!(body.ends_with("\n```\nfirst\nsecond\n```"));
    }

    #[test]
    fn no_excerpt_means_no_fence() {
        let body =
            compose_outcome_comment("Test FAILed.", "https://ci.example.com/", "job/1/", None);
        assert!(!body.contains("```"));
    }
}
