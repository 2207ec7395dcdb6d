//! Testimonial slider.

use serde::{Deserialize, Serialize};

use crate::actions::parse_int_prefix;
use crate::html::html_escape;

/// Which slide is visible. Indices wrap around at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    len: usize,
    current: usize,
}

impl Slider {
    /// A slider over `len` slides showing the first one.
    /// Returns `None` when there is nothing to slide.
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { len, current: 0 })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Show slide `index`. Past the end goes to the first slide, before the
    /// start goes to the last.
    pub fn show(&mut self, index: isize) -> usize {
        self.current = if index < 0 {
            self.len - 1
        } else if index as usize >= self.len {
            0
        } else {
            index as usize
        };
        self.current
    }

    pub fn next(&mut self) -> usize {
        self.show(self.current as isize + 1)
    }

    pub fn prev(&mut self) -> usize {
        self.show(self.current as isize - 1)
    }

    /// Jump to the slide named by a dot's `data-slide` attribute.
    /// Unparseable values are ignored.
    pub fn jump(&mut self, data_slide: &str) -> usize {
        match parse_int_prefix(data_slide).and_then(|i| isize::try_from(i).ok()) {
            Some(index) => self.show(index),
            None => self.current,
        }
    }

    /// Handle a keyboard key by its DOM name. Returns true if the slide changed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        let before = self.current;
        match key {
            "ArrowRight" => {
                self.next();
            }
            "ArrowLeft" => {
                self.prev();
            }
            _ => return false,
        }
        before != self.current
    }
}

/// One customer quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub author: String,
    pub quote: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Render the slider markup with the current slide and dot marked active.
pub fn render_testimonial_slider(testimonials: &[Testimonial], slider: &Slider) -> String {
    let slides: String = testimonials
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let avatar = t
                .avatar_url
                .as_ref()
                .map(|url| {
                    format!(
                        r#"<img src="{}" alt="{}" class="testimonial-avatar">"#,
                        html_escape(url),
                        html_escape(&t.author)
                    )
                })
                .unwrap_or_else(|| {
                    let initials: String = t
                        .author
                        .split_whitespace()
                        .filter_map(|w| w.chars().next())
                        .take(2)
                        .collect();
                    format!(
                        r#"<div class="testimonial-avatar placeholder">{}</div>"#,
                        html_escape(&initials)
                    )
                });

            format!(
                r#"<div class="testimonial-slide{active}">
            <blockquote class="testimonial-quote">"{quote}"</blockquote>
            <div class="testimonial-author">{avatar}<span>{author}</span></div>
        </div>"#,
                active = active_class(i == slider.current()),
                quote = html_escape(&t.quote),
                avatar = avatar,
                author = html_escape(&t.author),
            )
        })
        .collect();

    let dots: String = (0..testimonials.len())
        .map(|i| {
            format!(
                r#"<button class="slider-dot{}" data-slide="{}"></button>"#,
                active_class(i == slider.current()),
                i
            )
        })
        .collect();

    format!(
        r#"<div class="testimonial-slider">
    {slides}
    <button class="slider-prev" aria-label="Previous"><i class="fas fa-chevron-left"></i></button>
    <button class="slider-next" aria-label="Next"><i class="fas fa-chevron-right"></i></button>
    <div class="slider-dots">{dots}</div>
</div>"#
    )
}

fn active_class(active: bool) -> &'static str {
    if active {
        " active"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_slider() {
        assert!(Slider::new(0).is_none());
    }

    #[test]
    fn test_wraps_both_ways() {
        let mut slider = Slider::new(3).unwrap();
        assert_eq!(slider.prev(), 2);
        assert_eq!(slider.next(), 0);
        assert_eq!(slider.next(), 1);
        assert_eq!(slider.show(7), 0);
        assert_eq!(slider.show(-5), 2);
    }

    #[test]
    fn test_dot_jump() {
        let mut slider = Slider::new(3).unwrap();
        assert_eq!(slider.jump("2"), 2);
        assert_eq!(slider.jump("oops"), 2);
        assert_eq!(slider.jump("9"), 0);
    }

    #[test]
    fn test_arrow_keys() {
        let mut slider = Slider::new(2).unwrap();
        assert!(slider.handle_key("ArrowRight"));
        assert_eq!(slider.current(), 1);
        assert!(slider.handle_key("ArrowLeft"));
        assert_eq!(slider.current(), 0);
        assert!(!slider.handle_key("Enter"));

        let mut single = Slider::new(1).unwrap();
        assert!(!single.handle_key("ArrowRight"));
    }

    #[test]
    fn test_render_marks_active_slide() {
        let testimonials = vec![
            Testimonial {
                author: "Anna Smirnova".into(),
                quote: "Fast delivery".into(),
                avatar_url: None,
            },
            Testimonial {
                author: "Oleg".into(),
                quote: "Great <saw>".into(),
                avatar_url: Some("/img/oleg.jpg".into()),
            },
        ];
        let mut slider = Slider::new(testimonials.len()).unwrap();
        slider.next();

        let html = render_testimonial_slider(&testimonials, &slider);
        assert_eq!(html.matches("testimonial-slide active").count(), 1);
        assert!(html.contains(r#"<button class="slider-dot active" data-slide="1">"#));
        assert!(html.contains(">AS</div>"));
        assert!(html.contains("Great &lt;saw&gt;"));
    }
}
