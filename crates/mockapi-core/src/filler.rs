// ABOUTME: Placeholder content generation: the id checksum that fixes filler titles and categories,
// ABOUTME: lorem-ipsum descriptions, random ids, and fabricated user identities.

use rand::Rng;
use rand::seq::SliceRandom;
use uuid::Builder;

use crate::model::{Library, LibraryElement, User};
use crate::seed::{CATEGORIES, FILLER_TITLES};

const LOREM_WORDS: [&str; 48] = [
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in", "reprehenderit",
    "voluptate", "velit", "esse", "cillum", "fugiat", "nulla", "pariatur", "excepteur", "sint",
];

const FIRST_NAMES: [&str; 12] = [
    "Ana", "Bruno", "Carla", "Diego", "Elena", "Felipe", "Gabriela", "Hugo", "Irene", "Javier",
    "Lucia", "Martin",
];

const LAST_NAMES: [&str; 12] = [
    "Alvarez", "Benitez", "Castro", "Dominguez", "Escobar", "Fuentes", "Gimenez", "Herrera",
    "Ibarra", "Juarez", "Morales", "Navarro",
];

const EMAIL_DOMAINS: [&str; 4] = ["example.com", "example.org", "mail.test", "corp.test"];

/// Additive checksum of the character code points of `id`.
pub fn id_hash(id: &str) -> usize {
    id.chars().map(|c| c as usize).sum()
}

/// Title and category for the filler element at `index` of library `library_id`.
/// Stable for a given (id, index) pair.
pub fn filler_slot(library_id: &str, index: usize) -> (&'static str, &'static str) {
    let hash = id_hash(library_id);
    let title_offset = hash % FILLER_TITLES.len();
    let category_offset = hash % CATEGORIES.len();
    (
        FILLER_TITLES[(index + title_offset) % FILLER_TITLES.len()],
        CATEGORIES[(index + category_offset) % CATEGORIES.len()],
    )
}

/// Build a throwaway element for `index`. Only title and category are stable;
/// id and description are fresh on every call.
pub fn filler_element<R: Rng + ?Sized>(library_id: &str, index: usize, rng: &mut R) -> LibraryElement {
    let (title, category) = filler_slot(library_id, index);
    LibraryElement {
        id: random_id(rng),
        title: title.to_string(),
        category: category.to_string(),
        description: lorem_sentences(rng, 2),
    }
}

/// The full element list of a library: stored elements followed by filler for
/// indices `[stored.len(), context_count)`.
pub fn materialize<R: Rng + ?Sized>(library: &Library, rng: &mut R) -> Vec<LibraryElement> {
    let mut elements = library.stored.clone();
    for index in library.stored.len()..library.context_count {
        elements.push(filler_element(&library.id, index, rng));
    }
    elements
}

/// Random v4 UUID drawn from `rng`.
pub fn random_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    Builder::from_random_bytes(rng.r#gen()).into_uuid().to_string()
}

pub fn random_category<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    CATEGORIES.choose(rng).copied().unwrap_or(CATEGORIES[0])
}

/// `count` capitalized lorem-ipsum sentences of 4 to 10 words each.
pub fn lorem_sentences<R: Rng + ?Sized>(rng: &mut R, count: usize) -> String {
    let mut sentences = Vec::with_capacity(count);
    for _ in 0..count {
        let len = rng.gen_range(4..=10);
        let words: Vec<&str> = (0..len)
            .map(|_| LOREM_WORDS.choose(rng).copied().unwrap_or("lorem"))
            .collect();
        let mut sentence = capitalize(&words.join(" "));
        sentence.push('.');
        sentences.push(sentence);
    }
    sentences.join(" ")
}

/// A made-up user with a fresh id, full name and matching email.
pub fn fake_user<R: Rng + ?Sized>(rng: &mut R) -> User {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Ana");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Castro");
    let domain = EMAIL_DOMAINS.choose(rng).copied().unwrap_or("example.com");
    let suffix: u16 = rng.gen_range(1..1000);
    User {
        user_id: random_id(rng),
        email: format!("{}.{}{}@{}", first.to_lowercase(), last.to_lowercase(), suffix, domain),
        name: format!("{} {}", first, last),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CatalogOrg;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn hash_sums_code_points() {
        assert_eq!(id_hash(""), 0);
        assert_eq!(id_hash("ab"), 97 + 98);
    }

    #[test]
    fn filler_slot_follows_offsets() {
        let id = "lib-org001-001";
        let hash = id_hash(id);
        for index in 0..25 {
            let (title, category) = filler_slot(id, index);
            assert_eq!(title, FILLER_TITLES[(index + hash % 10) % 10]);
            assert_eq!(category, CATEGORIES[(index + hash % 6) % 6]);
        }
    }

    #[test]
    fn materialize_pads_to_context_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut lib = Library::new("lib-org002-007", "Performance Tuning", 7, CatalogOrg::Org002);
        lib.stored.push(LibraryElement {
            id: "stored-1".to_string(),
            title: "Mine".to_string(),
            category: "Guide".to_string(),
            description: "Mine".to_string(),
        });
        lib.context_count += 1;

        let elements = materialize(&lib, &mut rng);
        assert_eq!(elements.len(), 8);
        assert_eq!(elements[0].id, "stored-1");
        for (index, el) in elements.iter().enumerate().skip(1) {
            let (title, category) = filler_slot(&lib.id, index);
            assert_eq!(el.title, title);
            assert_eq!(el.category, category);
            assert!(!el.description.is_empty());
        }
    }

    #[test]
    fn filler_titles_are_stable_across_reads() {
        let lib = Library::new("lib-org001-003", "Cloud Deployment", 11, CatalogOrg::Org001);
        let a = materialize(&lib, &mut StdRng::seed_from_u64(1));
        let b = materialize(&lib, &mut StdRng::seed_from_u64(2));
        let titles_a: Vec<_> = a.iter().map(|e| (&e.title, &e.category)).collect();
        let titles_b: Vec<_> = b.iter().map(|e| (&e.title, &e.category)).collect();
        assert_eq!(titles_a, titles_b);
        assert_ne!(a[0].id, b[0].id);
    }

    #[test]
    fn lorem_has_requested_sentence_count() {
        let mut rng = StdRng::seed_from_u64(3);
        let text = lorem_sentences(&mut rng, 2);
        assert_eq!(text.matches('.').count(), 2);
        assert!(text.chars().next().unwrap().is_uppercase());
    }

    #[test]
    fn random_id_is_a_v4_uuid() {
        let mut rng = StdRng::seed_from_u64(11);
        let id = random_id(&mut rng);
        let parsed = uuid::Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn fake_user_email_matches_name() {
        let mut rng = StdRng::seed_from_u64(5);
        let user = fake_user(&mut rng);
        let first = user.name.split(' ').next().unwrap().to_lowercase();
        assert!(user.email.starts_with(&first));
        assert!(user.email.contains('@'));
    }
}
