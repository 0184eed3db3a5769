use crate::headings::{HeadingEntry, resolve_heading_boundary};
use crate::patch::{
    InsertionPosition, PatchError, PatchInstruction, PatchOperation, StructuredPatcher, TargetType,
};
use crate::splice::{splice_lines, splice_position};

/// Legacy heading-splice patch: resolve the heading path, compute the splice
/// line, and insert the content as one new line.
///
/// This path is deprecated but its output must stay byte-identical to the
/// historical behavior, so there is no blank-line collapsing and no content
/// normalization of any kind here.
pub fn apply_legacy_splice(
    text: &str,
    heading_path: &[String],
    position: InsertionPosition,
    content: &str,
    headings: &[HeadingEntry],
) -> Result<String, PatchError> {
    let boundary =
        resolve_heading_boundary(headings, heading_path).ok_or(PatchError::HeadingNotFound)?;

    let lines: Vec<&str> = text.split('\n').collect();
    let insert_at_start = position == InsertionPosition::Beginning;
    let at = splice_position(&lines, &boundary, insert_at_start, false);

    Ok(splice_lines(text, at, content))
}

/// Check the operation/target-type compatibility rules of a structured patch.
///
/// `rename` and `move` belong to `file` targets only, and `file` targets
/// accept nothing else; this runs before any other validation so that a
/// mismatched pair never reaches a strategy.
pub fn validate_instruction(instruction: &PatchInstruction) -> Result<(), PatchError> {
    let file_op = matches!(
        instruction.operation,
        PatchOperation::Rename | PatchOperation::Move
    );
    let file_target = instruction.target_type == TargetType::File;

    if file_op != file_target {
        return Err(PatchError::IncompatibleOperation {
            operation: instruction.operation,
            target_type: instruction.target_type,
        });
    }
    Ok(())
}

/// Structured patch over document text: validate, pre-resolve heading
/// targets, then hand the edit to the structured-patch primitive.
///
/// File rename/move never comes through here; it has no document text to
/// transform and is dispatched to [`super::rename_or_move`] instead.
pub fn apply_structured_patch(
    text: &str,
    instruction: &PatchInstruction,
    headings: &[HeadingEntry],
    patcher: &dyn StructuredPatcher,
) -> Result<String, PatchError> {
    validate_instruction(instruction)?;

    match instruction.target_type {
        TargetType::File => Err(PatchError::IncompatibleOperation {
            operation: instruction.operation,
            target_type: instruction.target_type,
        }),
        TargetType::Heading => {
            let path = instruction.heading_path();
            if path.is_empty() {
                return Err(PatchError::InvalidTarget(
                    "heading target is empty".to_string(),
                ));
            }
            if resolve_heading_boundary(headings, &path).is_none()
                && !instruction.create_target_if_missing
            {
                return Err(PatchError::HeadingNotFound);
            }
            patcher.apply_patch(text, instruction)
        }
        TargetType::Block | TargetType::Frontmatter => {
            if instruction.target.is_empty() {
                return Err(PatchError::InvalidTarget("target is empty".to_string()));
            }
            patcher.apply_patch(text, instruction)
        }
    }
}
