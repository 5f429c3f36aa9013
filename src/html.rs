use crate::view::{CatalogCard, GalleryImage, MasterCard};
use std::fmt::Write;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Renders one view node as an HTML fragment.
pub trait ToHtml {
    fn to_html(&self) -> String;
}

impl ToHtml for CatalogCard {
    fn to_html(&self) -> String {
        let mut out = String::with_capacity(512);
        // Writing into a String cannot fail.
        let _ = write_catalog_card(&mut out, self);
        out
    }
}

impl ToHtml for MasterCard {
    fn to_html(&self) -> String {
        let mut out = String::with_capacity(512);
        let _ = write_master_card(&mut out, self);
        out
    }
}

impl ToHtml for GalleryImage {
    fn to_html(&self) -> String {
        format!(
            "<img src=\"{}\" alt=\"{}\">",
            html_escape(&self.image),
            html_escape(&self.alt)
        )
    }
}

fn write_catalog_card(out: &mut String, card: &CatalogCard) -> std::fmt::Result {
    out.push_str("<div class=\"game-row\">");
    if let Some(image) = &card.image {
        write!(
            out,
            "<img src=\"{}\" alt=\"{}\" class=\"game-image\">",
            html_escape(image),
            html_escape(&card.title)
        )?;
    }
    out.push_str("<div class=\"game-content\"><div>");
    write!(
        out,
        "<strong>{}</strong><p>{}</p>",
        html_escape(&card.title),
        html_escape(&card.description)
    )?;
    if !card.tags.is_empty() {
        out.push_str("<div class=\"game-tags\">");
        for tag in &card.tags {
            write!(out, "<span class=\"tag\">{}</span>", html_escape(tag))?;
        }
        out.push_str("</div>");
    }
    out.push_str("</div>");
    write!(
        out,
        "<div class=\"game-meta-footer\">{} {}</div>",
        html_escape(&card.players),
        html_escape(&card.time)
    )?;
    out.push_str("</div></div>");
    Ok(())
}

fn write_master_card(out: &mut String, card: &MasterCard) -> std::fmt::Result {
    out.push_str("<div class=\"master-card\"><div class=\"master-header\">");
    write!(
        out,
        "<div class=\"master-portrait\"><img src=\"{}\" alt=\"{}\"></div>",
        html_escape(&card.image),
        html_escape(&card.name)
    )?;
    write!(
        out,
        "<div class=\"master-info\"><strong class=\"master-name\">{}</strong><p class=\"master-systems\">{}</p></div>",
        html_escape(&card.name),
        html_escape(&card.systems)
    )?;
    write!(
        out,
        "</div><p class=\"master-description\">{}</p></div>",
        html_escape(&card.description)
    )
}

pub fn render_all<V: ToHtml>(nodes: &[V]) -> Vec<String> {
    nodes.iter().map(ToHtml::to_html).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Locale;
    use crate::model::{CatalogItem, Range};
    use crate::view::ToView;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_catalog_card_without_tags_or_image() {
        let item = CatalogItem {
            title: "A".to_string(),
            description: "d".to_string(),
            image: None,
            tags: None,
            players: Some(Range { min: 2, max: 4 }),
            time: None,
        };
        let html = item.to_view(&Locale::default()).to_html();
        assert!(html.contains("<strong>A</strong>"));
        assert!(html.contains("<p>d</p>"));
        assert!(html.contains("👥 2–4"));
        assert!(!html.contains("game-tags"));
        assert!(!html.contains("class=\"tag\""));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_catalog_card_with_tags_and_image() {
        let card = CatalogCard {
            image: Some("img/azul.jpg".to_string()),
            title: "Azul".to_string(),
            description: "Tiles".to_string(),
            tags: vec!["family".to_string(), "abstract".to_string()],
            players: String::new(),
            time: "⏱ 45 хв".to_string(),
        };
        let html = card.to_html();
        assert!(html.contains(r#"<img src="img/azul.jpg" alt="Azul" class="game-image">"#));
        let family = html.find(">family<").unwrap();
        let abstract_ = html.find(">abstract<").unwrap();
        assert!(family < abstract_);
        assert!(html.contains("⏱ 45 хв"));
    }

    #[test]
    fn test_master_card_markup() {
        let card = MasterCard {
            image: "m.jpg".to_string(),
            name: "Bohdan".to_string(),
            systems: "Shadowrun, Alien".to_string(),
            description: "Runs <horror>".to_string(),
        };
        let html = card.to_html();
        assert!(html.starts_with("<div class=\"master-card\">"));
        assert!(html.contains(r#"<strong class="master-name">Bohdan</strong>"#));
        assert!(html.contains(r#"<p class="master-systems">Shadowrun, Alien</p>"#));
        assert!(html.contains("Runs &lt;horror&gt;"));
    }

    #[test]
    fn test_gallery_image_markup() {
        let image = GalleryImage {
            image: "g/1.jpg".to_string(),
            alt: "Фото клубу".to_string(),
        };
        assert_eq!(image.to_html(), r#"<img src="g/1.jpg" alt="Фото клубу">"#);
    }
}
