use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use utoipa::ToSchema;

use crate::models::Entry;

/// How many words the cloud shows.
pub const WORD_CLOUD_LIMIT: usize = 40;

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    "a,an,and,are,as,at,be,but,by,for,from,has,have,had,he,her,hers,his,i,if,in,into,is,it,its,\
     just,me,my,of,on,or,our,ours,she,so,that,the,their,them,they,this,to,too,very,was,we,were,\
     what,when,where,who,will,with,you,your,yours,im,i'm,it's,ive,i\u{2019}ve,theres,there's,got,\
     like,not,up,down,out,over,under,about,again,also,more,most,less,than,then,now,soon,yeah,yes,no"
        .split(',')
        .collect()
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word.to_lowercase().as_str())
}

/// Lowercases `text`, blanks everything but ASCII letters, whitespace and
/// apostrophes, and returns the whitespace-separated tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_whitespace() || c == '\'' {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Word frequencies over every entry using the built-in stopword list.
pub fn word_counts(entries: &[Entry]) -> Vec<WordCount> {
    word_counts_with(entries, &STOPWORDS)
}

/// Word frequencies over every entry, most frequent first. Equal counts keep
/// the order in which the words were first seen. `stopwords` must be lowercase.
pub fn word_counts_with(entries: &[Entry], stopwords: &HashSet<&str>) -> Vec<WordCount> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<WordCount> = Vec::new();

    let words = entries
        .iter()
        .flat_map(|e| tokenize(&e.text))
        .filter(|w| !stopwords.contains(w.as_str()));

    for word in words {
        match index.get(&word) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(word.clone(), counts.len());
                counts.push(WordCount { word, count: 1 });
            }
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

pub fn word_cloud(counts: &[WordCount]) -> Vec<WordCount> {
    counts.iter().take(WORD_CLOUD_LIMIT).cloned().collect()
}
