use crate::api::{Product, Record, User};
use crate::ui::renderfns::{stock_color, truncate};
use ratatui::prelude::*;

/// How a record is drawn in a list row and on its detail screen
pub trait RecordDisplay: Record {
  /// One list line
  fn row(&self) -> Line<'static>;

  /// Detail screen title
  fn heading(&self) -> String;

  fn detail(&self) -> Vec<Line<'static>>;
}

fn field(label: &'static str, value: String) -> Line<'static> {
  Line::from(vec![
    Span::styled(format!("{:<14}", label), Style::default().fg(Color::DarkGray)),
    Span::raw(value),
  ])
}

fn section(title: &'static str) -> Line<'static> {
  Line::from(Span::styled(title, Style::default().fg(Color::Yellow).bold()))
}

impl RecordDisplay for User {
  fn row(&self) -> Line<'static> {
    Line::from(vec![
      Span::styled(format!("{:<5}", self.id), Style::default().fg(Color::DarkGray)),
      Span::styled(
        format!("{:<24}", truncate(&self.full_name(), 24)),
        Style::default().fg(Color::Cyan),
      ),
      Span::raw(format!("{:<32}", truncate(&self.email, 32))),
      Span::styled(truncate(&self.company.name, 28), Style::default().fg(Color::Gray)),
    ])
  }

  fn heading(&self) -> String {
    self.full_name()
  }

  fn detail(&self) -> Vec<Line<'static>> {
    let address = &self.address;
    vec![
      field("Username", self.username.clone()),
      field("Email", self.email.clone()),
      field("Phone", self.phone.clone()),
      field("Age", format!("{} ({})", self.age, self.gender)),
      field("Born", self.birth_date.clone()),
      field("Role", self.role.clone()),
      Line::default(),
      section("Address"),
      field("Street", address.address.clone()),
      field(
        "City",
        format!("{}, {} {}", address.city, address.state_code, address.postal_code),
      ),
      field("Country", address.country.clone()),
      Line::default(),
      section("Company"),
      field("Name", self.company.name.clone()),
      field("Department", self.company.department.clone()),
      field("Title", self.company.title.clone()),
      Line::default(),
      section("Other"),
      field("University", self.university.clone()),
      field(
        "Physical",
        format!(
          "{:.1} cm, {:.1} kg, {} eyes, {} {} hair",
          self.height, self.weight, self.eye_color, self.hair.color, self.hair.kind
        ),
      ),
    ]
  }
}

impl RecordDisplay for Product {
  fn row(&self) -> Line<'static> {
    Line::from(vec![
      Span::styled(format!("{:<5}", self.id), Style::default().fg(Color::DarkGray)),
      Span::styled(
        format!("{:<36}", truncate(&self.title, 36)),
        Style::default().fg(Color::Cyan),
      ),
      Span::raw(format!("{:<18}", truncate(&self.category, 18))),
      Span::raw(format!("{:>10} ", format!("${:.2}", self.price))),
      Span::styled(format!("{:>5}", self.stock), Style::default().fg(stock_color(self.stock))),
    ])
  }

  fn heading(&self) -> String {
    self.title.clone()
  }

  fn detail(&self) -> Vec<Line<'static>> {
    let mut lines = vec![
      field("Brand", self.brand.clone().unwrap_or_else(|| "-".to_string())),
      field("Category", self.category.clone()),
      field("SKU", self.sku.clone()),
      field(
        "Price",
        format!("${:.2} ({:.1}% off)", self.price, self.discount_percentage),
      ),
      Line::from(vec![
        Span::styled(format!("{:<14}", "Stock"), Style::default().fg(Color::DarkGray)),
        Span::styled(
          format!("{} ({})", self.stock, self.availability_status),
          Style::default().fg(stock_color(self.stock)),
        ),
      ]),
      field("Rating", format!("{:.2}", self.rating)),
      field("Tags", self.tags.join(", ")),
      field("Warranty", self.warranty_information.clone()),
      field("Shipping", self.shipping_information.clone()),
      field("Returns", self.return_policy.clone()),
      Line::default(),
      section("Description"),
      Line::from(self.description.clone()),
    ];

    if !self.reviews.is_empty() {
      lines.push(Line::default());
      lines.push(section("Reviews"));
      for review in &self.reviews {
        lines.push(Line::from(vec![
          Span::styled(format!("{:.0}★ ", review.rating), Style::default().fg(Color::Yellow)),
          Span::styled(
            format!("{}: ", review.reviewer_name),
            Style::default().fg(Color::Cyan),
          ),
          Span::raw(review.comment.clone()),
        ]));
      }
    }
    lines
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn text(line: &Line) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
  }

  #[test]
  fn test_user_row() {
    let user = User {
      id: 1,
      first_name: "Emily".into(),
      last_name: "Johnson".into(),
      email: "emily.johnson@x.dummyjson.com".into(),
      ..User::default()
    };
    let row = text(&user.row());
    assert!(row.starts_with("1    Emily Johnson"));
    assert!(row.contains("emily.johnson@x.dummyjson.com"));
  }

  #[test]
  fn test_product_without_brand() {
    let product = Product {
      id: 16,
      title: "Apple".into(),
      price: 1.99,
      ..Product::default()
    };
    assert!(text(&product.row()).contains("$1.99"));
    let brand = text(&product.detail()[0]);
    assert!(brand.ends_with('-'));
  }

  #[test]
  fn test_reviews_listed() {
    let product = Product {
      reviews: vec![crate::api::types::Review {
        rating: 5.0,
        comment: "Great value!".into(),
        reviewer_name: "Ava Taylor".into(),
        ..Default::default()
      }],
      ..Product::default()
    };
    let detail: Vec<String> = product.detail().iter().map(text).collect();
    assert!(detail.iter().any(|l| l.contains("Ava Taylor: Great value!")));
  }
}
