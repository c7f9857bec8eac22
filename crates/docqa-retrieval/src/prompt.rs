/// Assemble the generation prompt from the question and the ranked passages
pub fn build_prompt(question: &str, passages: &[&str]) -> String {
    format!(
        "Use the following information to answer the question: \"{question}\"\n\
         Relevant Information:\n\
         {context}\n\n\
         Answer the question based only on the provided information. \
         If the information is not sufficient, say so.\n",
        question = question.trim(),
        context = passages.join("\n\n"),
    )
}
