use nyaya::domain::Embedding;

#[test]
fn given_identical_vectors_when_comparing_then_similarity_is_one() {
    let a = Embedding::new(vec![1.0, 2.0, 3.0]);
    let b = Embedding::new(vec![1.0, 2.0, 3.0]);

    assert!((a.cosine_similarity(&b) - 1.0).abs() < 1e-6);
}

#[test]
fn given_orthogonal_vectors_when_comparing_then_similarity_is_zero() {
    let a = Embedding::new(vec![1.0, 0.0]);
    let b = Embedding::new(vec![0.0, 1.0]);

    assert!(a.cosine_similarity(&b).abs() < 1e-6);
}

#[test]
fn given_mismatched_lengths_when_comparing_then_similarity_is_zero() {
    let a = Embedding::new(vec![1.0, 0.0, 0.0]);
    let b = Embedding::new(vec![1.0, 0.0]);

    assert_eq!(a.cosine_similarity(&b), 0.0);
}

#[test]
fn given_zero_vector_when_comparing_then_similarity_is_zero() {
    let a = Embedding::new(vec![0.0, 0.0]);
    let b = Embedding::new(vec![1.0, 1.0]);

    assert_eq!(a.cosine_similarity(&b), 0.0);
}

#[test]
fn given_values_when_normalizing_then_vector_has_unit_length() {
    let embedding = Embedding::normalized(vec![3.0, 4.0]);

    assert_eq!(embedding.dimensions(), 2);
    assert!((embedding.values[0] - 0.6).abs() < 1e-6);
    assert!((embedding.values[1] - 0.8).abs() < 1e-6);
}

#[test]
fn given_zero_vector_when_normalizing_then_values_are_kept() {
    let embedding = Embedding::normalized(vec![0.0, 0.0, 0.0]);

    assert_eq!(embedding.values, vec![0.0, 0.0, 0.0]);
}
