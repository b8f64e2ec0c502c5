//! Static listings served until the API grows order and delivery endpoints.

use crate::model::{DeliveryRequest, FoodCategory, MenuItem, Order, OrderItem, OrderStatus};

pub fn food_categories() -> Vec<FoodCategory> {
    [
        ("1", "Pizza", "🍕", "#FF6B47"),
        ("2", "Burger", "🍔", "#4CAF50"),
        ("3", "Asian", "🍜", "#FF9800"),
        ("4", "Dessert", "🍰", "#E91E63"),
        ("5", "Healthy", "🥗", "#8BC34A"),
        ("6", "Coffee", "☕", "#795548"),
    ]
    .into_iter()
    .map(|(id, name, icon, color)| FoodCategory {
        id: id.to_owned(),
        name: name.to_owned(),
        icon: icon.to_owned(),
        color: color.to_owned(),
    })
    .collect()
}

pub fn menu_items() -> Vec<MenuItem> {
    let item = |id: &str, name: &str, description: &str, price: f64, image_url: &str, category: &str| MenuItem {
        id: id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        price,
        image_url: image_url.to_owned(),
        category: category.to_owned(),
        is_vegetarian: false,
    };
    vec![
        item(
            "1",
            "Margherita Pizza",
            "Classic tomato sauce, mozzarella, basil",
            12.99,
            "https://images.unsplash.com/photo-1604382355076-af4b0eb60143?w=300",
            "Pizza",
        ),
        item(
            "2",
            "Classic Burger",
            "Beef patty, lettuce, tomato, onion",
            9.99,
            "https://images.unsplash.com/photo-1568901346375-23c9450c58cd?w=300",
            "Burger",
        ),
        item(
            "3",
            "Salmon Roll",
            "Fresh salmon, avocado, cucumber",
            8.99,
            "https://images.unsplash.com/photo-1579871494447-9811cf80d66c?w=300",
            "Sushi",
        ),
    ]
}

fn line(menu: &[MenuItem], index: usize, quantity: u32) -> Option<OrderItem> {
    menu.get(index)
        .map(|menu_item| OrderItem { menu_item: menu_item.clone(), quantity, special_instructions: None })
}

fn lines(menu: &[MenuItem], picks: &[(usize, u32)]) -> Vec<OrderItem> {
    picks.iter().filter_map(|&(index, quantity)| line(menu, index, quantity)).collect()
}

pub fn restaurant_orders() -> Vec<Order> {
    let menu = menu_items();
    let order = |id: &str, picks: &[(usize, u32)], status, total, created_at: &str, eta: Option<&str>| Order {
        id: id.to_owned(),
        restaurant_name: "Pizza Palace".to_owned(),
        items: lines(&menu, picks),
        status,
        total_amount: total,
        created_at: created_at.to_owned(),
        estimated_delivery: eta.map(str::to_owned),
        delivery_address: None,
    };
    vec![
        order("R001", &[(0, 2)], OrderStatus::Pending, 25.98, "2 min ago", Some("25-35 min")),
        order("R002", &[(0, 1), (1, 1)], OrderStatus::Preparing, 22.98, "8 min ago", Some("20-30 min")),
        order("R003", &[(2, 3)], OrderStatus::ReadyForPickup, 26.97, "15 min ago", None),
    ]
}

pub fn delivery_requests() -> Vec<DeliveryRequest> {
    let menu = menu_items();
    vec![
        DeliveryRequest {
            id: "D001".to_owned(),
            order_number: "ORD-001".to_owned(),
            restaurant_name: "Pizza Palace".to_owned(),
            customer_name: "John Doe".to_owned(),
            pickup_address: "123 Restaurant St".to_owned(),
            delivery_address: "456 Customer Ave".to_owned(),
            distance: "2.3 km".to_owned(),
            estimated_earnings: 8.50,
            items: lines(&menu, &[(0, 2)]),
            special_instructions: None,
        },
        DeliveryRequest {
            id: "D002".to_owned(),
            order_number: "ORD-002".to_owned(),
            restaurant_name: "Burger Haven".to_owned(),
            customer_name: "Jane Smith".to_owned(),
            pickup_address: "789 Burger Blvd".to_owned(),
            delivery_address: "321 Home St".to_owned(),
            distance: "1.8 km".to_owned(),
            estimated_earnings: 6.75,
            items: lines(&menu, &[(1, 1)]),
            special_instructions: None,
        },
    ]
}

pub fn user_orders() -> Vec<Order> {
    let menu = menu_items();
    vec![
        Order {
            id: "U001".to_owned(),
            restaurant_name: "Pizza Palace".to_owned(),
            items: lines(&menu, &[(0, 1)]),
            status: OrderStatus::OutForDelivery,
            total_amount: 15.98,
            created_at: "30 min ago".to_owned(),
            estimated_delivery: Some("10 min".to_owned()),
            delivery_address: Some("123 My Street".to_owned()),
        },
        Order {
            id: "U002".to_owned(),
            restaurant_name: "Sushi Zen".to_owned(),
            items: lines(&menu, &[(2, 2)]),
            status: OrderStatus::Delivered,
            total_amount: 19.98,
            created_at: "2 days ago".to_owned(),
            estimated_delivery: None,
            delivery_address: Some("123 My Street".to_owned()),
        },
    ]
}
