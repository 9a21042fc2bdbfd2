use sparse_text_vectorizer::{SimpleTokenizer, TextVectorizer, Tokenizer, VectorMode, VectorizerConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let texts = [
        "The cat and the cat hate each other.",
        "The dog is the bird.",
        "No, the bird and cat hate other dog.",
    ];
    let docs: Vec<Vec<String>> = texts.iter().map(|t| SimpleTokenizer.tokenize(t)).collect();

    // fit once, then reuse the frozen model
    let vectorizer: TextVectorizer = TextVectorizer::fit(&docs, VectorizerConfig::default())?;
    println!("features: {:?}", vectorizer.feature_names());

    let counts = vectorizer.transform_many(&docs);
    let binary = vectorizer.transform_many_with_mode(&docs, VectorMode::Binary);
    let weighted = vectorizer.tfidf(&docs)?;

    for (i, text) in texts.iter().enumerate() {
        println!("\n{text}");
        println!("  count : {:?}", counts.rows()[i].to_dense());
        println!("  binary: {:?}", binary.rows()[i].to_dense());
        let row = &weighted.rows()[i];
        for (index, weight) in row.iter() {
            println!("  tf-idf {:>6} = {weight:.4}", vectorizer.vocabulary().token(index).unwrap_or("?"));
        }
    }

    let query = vectorizer.weight_document(&SimpleTokenizer.tokenize("a cat that hates dogs"))?;
    for (i, row) in weighted.iter().enumerate() {
        println!("similarity to doc {i}: {:.4}", query.cosine_similarity(row));
    }
    Ok(())
}
