//! End-to-end segmentation scenarios against the bundled default dictionary.

use zhseg::Jieba;

#[test]
fn precise_mode_documented_scenarios() {
    let jieba = Jieba::new().unwrap();

    assert_eq!(
        jieba.lcut("我来到北京清华大学", false, true),
        vec!["我", "来到", "北京", "清华大学"]
    );

    assert_eq!(
        jieba.lcut("他来到了网易杭研大厦", false, true),
        vec!["他", "来到", "了", "网易", "杭研", "大厦"]
    );

    assert_eq!(
        jieba.lcut("小明硕士毕业于中国科学院计算所", false, true),
        vec!["小明", "硕士", "毕业", "于", "中国科学院", "计算所"]
    );
}

#[test]
fn precise_mode_mixed_chinese_latin_and_punctuation() {
    let jieba = Jieba::new().unwrap();
    let tokens = jieba.lcut("我来到北京清华大学，今天天气不错,good day!", false, true);
    assert_eq!(
        tokens,
        vec![
            "我", "来到", "北京", "清华大学", "，", "今天天气", "不错", ",", "good", " ", "day",
            "!",
        ]
    );
}

#[test]
fn full_mode_emits_every_dag_edge() {
    let jieba = Jieba::new().unwrap();
    let tokens = jieba.lcut("我来到北京清华大学", true, false);
    assert_eq!(
        tokens,
        vec!["我", "来到", "北京", "清华", "清华大学", "华大", "大学"]
    );
}

#[test]
fn search_mode_surfaces_subgrams_before_the_parent_word() {
    let jieba = Jieba::new().unwrap();
    let tokens = jieba.lcut_for_search("小明硕士毕业于中国科学院计算所", true);
    let pos = |w: &str| tokens.iter().position(|t| t == w).unwrap();
    for sub in ["中国", "科学", "学院", "科学院"] {
        assert!(pos(sub) < pos("中国科学院"));
    }
}
