use criterion::{Criterion, criterion_group, criterion_main};
use phrasecards::CefrLevel;
use phrasecards::parser::extract_cards;
use std::hint::black_box;

fn sample_response(cards: usize) -> String {
    (1..=cards)
        .map(|n| {
            format!(
                "{n}.\n\
                 Expression: expresión número {n}\n\
                 Context: Everyday conversation\n\
                 Translation: expression number {n}\n\
                 Literal translation: N/A\n\
                 Example sentence: Usamos la expresión {n} todos los días.\n\
                 Example translation: We use expression {n} every day.\n\
                 Notes: Neutral register, works with friends and colleagues,\n\
                 and also in writing.\n\
                 CEFR level: B1\n"
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_extract_cards(c: &mut Criterion) {
    let response = sample_response(200);

    c.bench_function("extract_cards", |b| {
        b.iter(|| {
            let extraction =
                extract_cards(black_box(&response), CefrLevel::B1).expect("failed to extract cards");
            black_box(extraction);
        });
    });
}

criterion_group!(benches, bench_extract_cards);
criterion_main!(benches);
